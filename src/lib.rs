//! SideShelf
//!
//! 剪贴板历史货架：保留有限时长、有限数量的文本与图片历史

pub mod bootstrap;
pub mod cli;
