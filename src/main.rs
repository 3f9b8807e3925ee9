use anyhow::Result;
use property_filter::config::FilterConfig;
use property_filter::filter::FilterBuilder;
use property_filter::request::QueryString;
use property_filter::sql_builder;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// 创建Filter构造器, 优先使用JSON配置, 失败时使用默认配置
fn create_builder_with_config() -> FilterBuilder {
    match FilterConfig::from_json_file("filter_config.json") {
        Ok(config) => {
            println!("✅ 成功从JSON配置文件加载Filter配置");
            FilterBuilder::from_config(config)
        }
        Err(e) => {
            println!("⚠️ 无法加载JSON配置文件 ({}), 使用默认配置", e);
            FilterBuilder::new()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("--- Property Filter: 查询参数到SQL条件编译器 ---");

    let builder = create_builder_with_config();
    println!("当前参数名前缀: {}", builder.config().filter_prefix);

    // 1. 示例查询串
    let query = "filter_EQS_name=Alice&filter_GTI_age=30&filter_LIKES_email=%40example.com\
                 &filter_INS_deleted_at=&filter_BTDD_created_at=2010-09-09&page=2";
    println!("\n[输入查询串]:\n{}\n", query);

    // 2. 解析为PropertyFilter列表
    println!("[步骤 1]: 解析查询参数...");
    let source = QueryString::parse(query);
    match builder.build_from_source(&source) {
        Ok(filters) => {
            println!("✓ 生成了 {} 个过滤条件", filters.len());
            for filter in &filters {
                println!(
                    "  {:?} {:?} {:?} (原始值: {:?})",
                    filter.match_type(),
                    filter.property_names(),
                    filter.match_value(),
                    filter.origin_value()
                );
            }

            // 3. 编译为SQL
            println!("\n[步骤 2]: 编译为SQL...");
            match sql_builder::select_sql("users", &filters) {
                Ok(sql) => {
                    println!("✅ 成功编译为 SQL");
                    println!("\n[生成的 SQL]:");
                    println!("{}", sql);
                }
                Err(e) => println!("✗ SQL 编译失败: {}", e),
            }
        }
        Err(e) => println!("✗ 解析失败: {}", e),
    }

    // 4. 交互模式: 输入查询串, 输出SQL
    println!("\n--- 交互模式 (Ctrl-D 退出) ---");
    println!("输入形如 filter_EQS_name=Alice&filter_GTI_age=30 的查询串");

    let Ok(mut editor) = DefaultEditor::new() else {
        println!("⚠️ 当前环境不支持交互输入, 退出");
        return Ok(());
    };

    loop {
        match editor.readline("filter> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                let source = QueryString::parse(line);
                match builder.build_from_source(&source) {
                    Ok(filters) if filters.is_empty() => {
                        println!("(没有匹配前缀 {}_ 的参数)", builder.config().filter_prefix);
                    }
                    Ok(filters) => match sql_builder::select_sql("users", &filters) {
                        Ok(sql) => println!("{}", sql),
                        Err(e) => println!("✗ SQL 编译失败: {}", e),
                    },
                    Err(e) => println!("✗ 解析失败: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                println!("✗ 读取输入失败: {}", e);
                break;
            }
        }
    }

    Ok(())
}
