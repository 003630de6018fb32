mod common;
mod docs;
mod storage;
