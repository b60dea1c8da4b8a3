//! # CAS Resolver
//!
//! 一个把化学物质常用名解析为 CAS 登记号的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Browser）
//! - `browser/` - 浏览器会话的启动、持有与关闭
//! - `BrowserSession` - 唯一的 Browser owner，持有事件处理任务和页面
//! - `SessionHandle` - 区分借用会话与内部创建会话的释放策略
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 所有外部服务的 HTTP 客户端
//! - `CirClient` - Chemical Identifier Resolver 查询能力
//! - `PubChemClient` - PubChem 名称检索能力（只取最佳匹配 CID）
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个化合物页面
//! - `CasScraper` - 页面加载、等待渲染、按文档顺序抓取 CAS
//!
//! ### ④ 流程层（Resolver）
//! - `resolver` - 流程编排（方法调度 → 查询 → 结果整形 → 会话释放）
//!
//! ## 两种解析方法
//!
//! - `cir`: 使用 Chemical Identifier Resolver，速度快但经常查不到
//! - `pubchem`: 使用 PubChem 数据库加浏览器抓取，慢但更可靠（推荐）

pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use browser::{BrowserSession, SessionHandle};
pub use config::Config;
pub use error::{ApiError, AppError, BrowserError, Result};
pub use models::{Lookup, Method, NotFoundReason, ResolveOutcome};
pub use resolver::NameResolver;
pub use services::CasScraper;
