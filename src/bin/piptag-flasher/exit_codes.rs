pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_BAD_TABLE: i32 = 10;
pub const EXIT_UNEXPECTED: i32 = 20;
