pub mod generate;
pub mod init_db;
pub mod load;
