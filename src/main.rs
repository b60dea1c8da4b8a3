use anyhow::Result;
use cas_resolver::utils::logging;
use cas_resolver::{Config, Method, NameResolver, ResolveOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 命令行参数：物质名称 [方法]
    let mut args = std::env::args().skip(1);
    let name = match args.next() {
        Some(name) => name,
        None => {
            eprintln!("用法: cas_resolver <物质名称> [cir|pubchem]");
            std::process::exit(2);
        }
    };
    let method = match args.next() {
        Some(m) => m.parse::<Method>().map_err(anyhow::Error::msg)?,
        None => Method::default(),
    };

    let resolver = NameResolver::new(config)?;

    match resolver.resolve(&name, method, None, true).await? {
        ResolveOutcome::First(cas) => println!("{}", cas),
        ResolveOutcome::All(cas_list) => println!("{}", cas_list.join("\n")),
        ResolveOutcome::NotFound(reason) => {
            eprintln!("未找到 CAS: {}", reason);
            std::process::exit(1);
        }
    }

    Ok(())
}
