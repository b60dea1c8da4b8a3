//! 浏览器基础设施层
//!
//! 持有稀缺资源（Browser / Page），只暴露会话能力，不认识 CAS、不处理业务流程。

pub mod session;

pub use session::{BrowserSession, SessionHandle};
