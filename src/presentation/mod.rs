pub mod row;
pub mod sink;
pub mod table;
