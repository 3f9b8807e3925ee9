//! 与具体ORM实现无关的属性过滤条件解析库.
//!
//! 把web请求中按命名规则编写的查询参数 (`filter_EQS_name=Alice`) 解析为
//! 结构化的 [`filter::PropertyFilter`] 列表, 供下游的查询构造逻辑使用;
//! `sql_builder` 模块提供一个基于sea-query的参考实现.

pub mod config;
pub mod convert;
pub mod filter;
pub mod request;
pub mod sql_builder;
pub mod types;
