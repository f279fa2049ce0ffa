//! 库存扣减引擎
//!
//! 订单进入制作状态时，按配方从所属门店的库存中扣减原料。

pub mod deduction;

pub use deduction::process_order;
