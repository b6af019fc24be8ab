use fanls_core::semantic::parse_document;
use std::path::PathBuf;
use tracing::info;

pub fn run(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(&file)?;
    let list = parse_document(&source, 0);

    info!("tokenized {} ({} tokens)", file.display(), list.records.len());

    for record in &list.records {
        println!(
            "{}:{} {:<8} {}",
            record.line + 1,
            record.start,
            record.category.as_str(),
            record.text
        );
    }
    println!("{} tokens", list.records.len());

    Ok(())
}
