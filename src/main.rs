use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use worklog_query::parser;
use worklog_query::sql::LookupCompiler;
use worklog_query::{MemoryStore, Results, SearchConfig};

const DEFAULT_STORE: &str = "worklog.json";
const DEFAULT_CONFIG: &str = "search_config.json";

/// 加载工作日志，文件不存在时使用内置示例数据
fn load_store(path: &str) -> Result<MemoryStore> {
    if !std::path::Path::new(path).exists() {
        warn!(path, "work log not found, using built-in sample");
        return Ok(MemoryStore::sample());
    }
    MemoryStore::from_json_file(path).with_context(|| format!("加载工作日志失败: {}", path))
}

/// 加载搜索配置，失败时使用默认配置
fn load_config(path: &str) -> SearchConfig {
    match SearchConfig::from_json_file(path) {
        Ok(config) => {
            println!("✅ 使用JSON配置文件: {}", path);
            config
        }
        Err(e) => {
            warn!(error = %e, "falling back to default search config");
            SearchConfig::default()
        }
    }
}

/// 显示开关
#[derive(Debug, Default)]
struct Toggles {
    sql: bool,
    components: bool,
}

fn run_query(
    line: &str,
    toggles: &Toggles,
    results: &Results<MemoryStore>,
    compiler: &LookupCompiler,
    store: &MemoryStore,
) -> Result<()> {
    let components = parser::parse(line);

    if toggles.components {
        for clause in parser::clauses(line) {
            println!("  子句 {}..{}: {}", clause.span.start, clause.span.end, &line[clause.span.start..clause.span.end]);
        }
        for component in &components {
            println!("  组件: {}", component);
        }
    }

    if toggles.sql {
        for (species, sql) in compiler.compile_set(&components) {
            match sql {
                Ok(sql) => println!("  [{}] {}", species, sql),
                Err(e) => println!("  [{}] ✗ {}", species, e),
            }
        }
    }

    let found = results.find(&components, store)?;
    if found.is_empty() {
        println!("(无结果)");
    }
    for (label, entities) in found.groups() {
        println!("{} ({})", label, entities.len());
        for entity in entities {
            println!("  • {}", entity);
        }
    }
    for component in &found.unsupported {
        println!("⚠️ 暂不支持的命令: {}", component);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let store_path = std::env::var("WORKLOG_STORE").unwrap_or_else(|_| DEFAULT_STORE.to_string());
    let config_path = std::env::var("WORKLOG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG.to_string());

    println!("--- Worklog Query: 结构化搜索 ---");
    let store = load_store(&store_path)?;
    let config = load_config(&config_path);
    let results = Results::from_config(&config);
    let compiler = LookupCompiler::from_config(config);

    println!("可搜索的物种: {}", results.species().join(", "));
    println!("输入例如 @job.id=412；:sql 切换SQL显示，:components 切换组件显示，:quit 退出\n");

    let mut editor = DefaultEditor::new().context("无法初始化行编辑器")?;
    let mut toggles = Toggles::default();

    loop {
        match editor.readline("search> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = editor.add_history_entry(line) {
                    warn!(error = %e, "cannot record history entry");
                }

                match line {
                    ":quit" | ":q" => break,
                    ":sql" => {
                        toggles.sql = !toggles.sql;
                        println!("SQL显示: {}", if toggles.sql { "开" } else { "关" });
                    }
                    ":components" => {
                        toggles.components = !toggles.components;
                        println!("组件显示: {}", if toggles.components { "开" } else { "关" });
                    }
                    _ => run_query(line, &toggles, &results, &compiler, &store)?,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("读取输入失败"),
        }
    }

    Ok(())
}
