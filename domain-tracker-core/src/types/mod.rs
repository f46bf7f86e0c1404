//! 类型定义模块

mod identity;
mod record;

pub use identity::Identity;
pub use record::{DomainRecord, FieldKey, NewDomainRecord, RecordFields, RecordPatch};
