pub mod author;
pub mod book;
pub mod client;
pub mod editor;
pub mod manuscript;
pub mod sales_record;
pub mod salesperson;
pub mod series;
