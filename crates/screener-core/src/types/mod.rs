//! 공통 타입 정의.

mod period;

pub use period::*;
