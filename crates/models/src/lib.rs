pub mod errors;
pub mod db;
pub mod todo_item;

#[cfg(test)]
mod tests;
