//! Integration tests for the PostgreSQL store.
//!
//! Exercises the repositories and `PgStore` against a real database:
//! - Insert and update round trips
//! - Author-linked creation and listing
//! - Cascading delete of association rows
//! - Foreign key violations

use assert_matches::assert_matches;
use chrono::NaiveDate;
use risuspubl_core::commons::Commons;
use risuspubl_core::entity::{Association, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::store::{EntityStore, Store};
use risuspubl_db::models::author::{Author, NewAuthor};
use risuspubl_db::models::book::{Book, NewBook};
use risuspubl_db::models::editor::{Editor, NewEditor};
use risuspubl_db::models::manuscript::{Manuscript, NewManuscript};
use risuspubl_db::models::sales_record::{NewSalesRecord, SalesRecord};
use risuspubl_db::PgStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_author(last_name: &str) -> NewAuthor {
    NewAuthor {
        first_name: "Octavia".to_string(),
        last_name: last_name.to_string(),
    }
}

fn new_editor() -> NewEditor {
    NewEditor {
        first_name: "Maxwell".to_string(),
        last_name: "Perkins".to_string(),
        salary: 85_000,
    }
}

fn new_book(editor_id: i64, title: &str) -> NewBook {
    NewBook {
        editor_id,
        series_id: None,
        title: title.to_string(),
        publication_date: NaiveDate::from_ymd_opt(1979, 6, 1),
        edition_number: 1,
        pages: Some(264),
        is_in_print: true,
    }
}

fn new_manuscript(editor_id: i64) -> NewManuscript {
    NewManuscript {
        editor_id,
        series_id: None,
        working_title: "Parable of the Talents".to_string(),
        due_date: NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
        advance: 40_000,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_insert_and_update_editor(pool: PgPool) {
    let store = PgStore::new(pool);

    let editor: Editor = store.insert(&new_editor()).await.unwrap();
    assert_eq!(editor.last_name, "Perkins");
    assert!(store.exists(EntityKind::Editor, editor.editor_id).await.unwrap());

    let mut changed = editor.clone();
    changed.salary = 90_000;
    let saved: Editor = store.save(&changed).await.unwrap();
    assert_eq!(saved.salary, 90_000);

    let found: Option<Editor> = store.find_by_id(editor.editor_id).await.unwrap();
    assert_eq!(found, Some(saved));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_save_missing_row_is_not_found(pool: PgPool) {
    let store = PgStore::new(pool);
    let ghost = Editor {
        editor_id: 999,
        first_name: "No".to_string(),
        last_name: "One".to_string(),
        salary: 0,
    };

    let err = EntityStore::<Editor>::save(&store, &ghost).await.unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Editor", id: 999 });
}

#[sqlx::test(migrations = "./migrations")]
async fn test_insert_linked_book_and_list_by_author(pool: PgPool) {
    let store = PgStore::new(pool);
    let author: Author = store.insert(&new_author("Butler")).await.unwrap();
    let other: Author = store.insert(&new_author("Delany")).await.unwrap();
    let editor: Editor = store.insert(&new_editor()).await.unwrap();

    let book: Book = store
        .insert_linked(&new_book(editor.editor_id, "Kindred"), Association::AuthorsBooks, &[author.author_id])
        .await
        .unwrap();
    assert_eq!(book.title, "Kindred");

    let linked: Vec<Book> = store
        .list_linked(Association::AuthorsBooks, &[author.author_id])
        .await
        .unwrap();
    assert_eq!(linked, vec![book]);

    let unlinked: Vec<Book> = store
        .list_linked(Association::AuthorsBooks, &[other.author_id])
        .await
        .unwrap();
    assert!(unlinked.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_co_authored_book_lists_only_under_both_authors(pool: PgPool) {
    let store = PgStore::new(pool);
    let first: Author = store.insert(&new_author("Pratchett")).await.unwrap();
    let second: Author = store.insert(&new_author("Gaiman")).await.unwrap();
    let editor: Editor = store.insert(&new_editor()).await.unwrap();

    let solo: Book = store
        .insert_linked(&new_book(editor.editor_id, "Mort"), Association::AuthorsBooks, &[first.author_id])
        .await
        .unwrap();
    let shared: Book = store
        .insert_linked(
            &new_book(editor.editor_id, "Good Omens"),
            Association::AuthorsBooks,
            &[first.author_id, second.author_id],
        )
        .await
        .unwrap();

    let by_first: Vec<Book> = store
        .list_linked(Association::AuthorsBooks, &[first.author_id])
        .await
        .unwrap();
    assert_eq!(by_first, vec![solo, shared.clone()]);

    let by_both: Vec<Book> = store
        .list_linked(Association::AuthorsBooks, &[first.author_id, second.author_id])
        .await
        .unwrap();
    assert_eq!(by_both, vec![shared]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_insert_linked_with_unknown_author_writes_nothing(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let author: Author = store.insert(&new_author("Butler")).await.unwrap();
    let editor: Editor = store.insert(&new_editor()).await.unwrap();

    let err = EntityStore::<Book>::insert_linked(
        &store,
        &new_book(editor.editor_id, "Fledgling"),
        Association::AuthorsBooks,
        &[author.author_id, 4242],
    )
    .await
    .unwrap_err();
    assert_matches!(err, CoreError::Integrity(_));

    let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(books, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_insert_with_unknown_editor_fails(pool: PgPool) {
    let store = PgStore::new(pool);

    let err = EntityStore::<Book>::insert(&store, &new_book(12345, "Orphan"))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Integrity(_));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_manuscript_removes_association_rows(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let first: Author = store.insert(&new_author("Butler")).await.unwrap();
    let second: Author = store.insert(&new_author("Le Guin")).await.unwrap();
    let editor: Editor = store.insert(&new_editor()).await.unwrap();

    let manuscript: Manuscript = store
        .insert_linked(
            &new_manuscript(editor.editor_id),
            Association::AuthorsManuscripts,
            &[first.author_id, second.author_id],
        )
        .await
        .unwrap();

    let unlinked = Commons::standard()
        .delete_model::<Manuscript, _>(&store, manuscript.manuscript_id)
        .await
        .unwrap();
    assert_eq!(unlinked, 2);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors_manuscripts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert!(!store.exists(EntityKind::Manuscript, manuscript.manuscript_id).await.unwrap());
    assert!(store.exists(EntityKind::Author, second.author_id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_referenced_book_rolls_back(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let author: Author = store.insert(&new_author("Herbert")).await.unwrap();
    let editor: Editor = store.insert(&new_editor()).await.unwrap();
    let book: Book = store
        .insert_linked(&new_book(editor.editor_id, "Dune"), Association::AuthorsBooks, &[author.author_id])
        .await
        .unwrap();
    let _record: SalesRecord = store
        .insert(&NewSalesRecord {
            book_id: book.book_id,
            year: 2020,
            month: 5,
            copies_sold: 1200,
            gross_profit: 18_000.0,
            net_profit: 6_500.0,
        })
        .await
        .unwrap();

    let err = Commons::standard()
        .delete_model::<Book, _>(&store, book.book_id)
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Integrity(_));

    // The association row deleted before the failure must be restored.
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors_books WHERE book_id = $1")
        .bind(book.book_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_missing_row_is_not_found(pool: PgPool) {
    let store = PgStore::new(pool);

    let err = store
        .delete_cascade(EntityKind::Series, 77, &[])
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Series", id: 77 });
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_check(pool: PgPool) {
    let store = PgStore::new(pool);
    store.health_check().await.unwrap();
}
