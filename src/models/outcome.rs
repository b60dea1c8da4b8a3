//! 解析结果模型
//!
//! CAS 号一经获得即原样传递，不做校验、不做改写。

use std::fmt;
use std::str::FromStr;

/// 解析方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Chemical Identifier Resolver：速度快但经常查不到
    Cir,
    /// PubChem 数据库 + 浏览器抓取：慢但更可靠（推荐）
    #[default]
    PubChem,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Cir => write!(f, "cir"),
            Method::PubChem => write!(f, "pubchem"),
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cir" => Ok(Method::Cir),
            "pubchem" => Ok(Method::PubChem),
            other => Err(format!("未知的解析方法: {}", other)),
        }
    }
}

/// 未找到 CAS 的原因
///
/// 区分"数据库里没有这个物质"和"服务挂了"，调用方可以据此决定要不要换个方法重试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// 数据库中没有匹配的物质
    NoMatch,
    /// 远程服务不可用或返回异常
    ServiceError,
    /// 超时时间内页面未渲染出 CAS 区域
    RenderTimeout,
    /// 结果列表为空，无法取第一个
    EmptyResult,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::NoMatch => write!(f, "数据库中没有匹配的物质"),
            NotFoundReason::ServiceError => write!(f, "远程服务不可用"),
            NotFoundReason::RenderTimeout => write!(f, "页面加载超时，未出现 CAS 区域"),
            NotFoundReason::EmptyResult => write!(f, "结果列表为空"),
        }
    }
}

/// 单次策略查询的结果
///
/// 远程故障在策略内部就地吞掉并转成 `NotFound`，
/// `Err` 只保留给资源初始化这类无法继续的失败。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// 按文档顺序排列的 CAS 号（可能为空）
    Found(Vec<String>),
    /// 未找到，附带原因
    NotFound(NotFoundReason),
}

/// 返回给调用方的最终形状
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// 第一个 CAS 号（first_only = true）
    First(String),
    /// 完整的 CAS 列表（first_only = false）
    All(Vec<String>),
    /// 未找到
    NotFound(NotFoundReason),
}

impl ResolveOutcome {
    /// 取第一个 CAS 号（如果有）
    pub fn first(&self) -> Option<&str> {
        match self {
            ResolveOutcome::First(cas) => Some(cas),
            ResolveOutcome::All(list) => list.first().map(String::as_str),
            ResolveOutcome::NotFound(_) => None,
        }
    }

    /// 是否未找到
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveOutcome::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!("cir".parse::<Method>().unwrap(), Method::Cir);
        assert_eq!("pubchem".parse::<Method>().unwrap(), Method::PubChem);
        assert_eq!("PubChem".parse::<Method>().unwrap(), Method::PubChem);
        assert!("selenium".parse::<Method>().is_err());
    }

    #[test]
    fn test_default_method_is_pubchem() {
        assert_eq!(Method::default(), Method::PubChem);
    }

    #[test]
    fn test_outcome_first() {
        let first = ResolveOutcome::First("50-78-2".to_string());
        assert_eq!(first.first(), Some("50-78-2"));

        let all = ResolveOutcome::All(vec!["50-78-2".to_string(), "11126-35-5".to_string()]);
        assert_eq!(all.first(), Some("50-78-2"));

        let not_found = ResolveOutcome::NotFound(NotFoundReason::NoMatch);
        assert_eq!(not_found.first(), None);
        assert!(not_found.is_not_found());
    }

    #[test]
    fn test_empty_list_has_no_first() {
        let all = ResolveOutcome::All(Vec::new());
        assert_eq!(all.first(), None);
        assert!(!all.is_not_found());
    }
}
