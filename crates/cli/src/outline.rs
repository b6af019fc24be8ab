use fanls_core::outline::{build_outline, OutlineKind, OutlineNode};
use fanls_core::semantic::parse_document;
use std::path::PathBuf;

pub fn run(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(&file)?;
    let list = parse_document(&source, 0);
    let outline = build_outline(&list);

    if outline.is_empty() {
        println!("no declarations found in {}", file.display());
        return Ok(());
    }

    for node in &outline {
        print_node(node, 0);
    }

    Ok(())
}

fn print_node(node: &OutlineNode, depth: usize) {
    let label = match node.kind {
        OutlineKind::Class => "class",
        OutlineKind::Method => "method",
        OutlineKind::Field => "field",
    };
    println!(
        "{}{} {} (line {})",
        "  ".repeat(depth),
        label,
        node.name,
        node.line + 1
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
