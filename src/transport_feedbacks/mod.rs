pub mod tmmbn;
