use confdiff::{Cell, DiffAlgorithm, DiffEngine, DiffOptions, SimilarDiffer};

fn main() {
    let old = r#"server.port=8848
spring.datasource.url=jdbc:mysql://db-a:3306/nacos
spring.datasource.pool=10
logging.level=INFO
"#;

    let new = r#"server.port=8848
spring.datasource.url=jdbc:mysql://db-b:3306/nacos
logging.level=DEBUG
feature.flags=beta,<canary>
"#;

    for algorithm in [DiffAlgorithm::Myers, DiffAlgorithm::Patience] {
        let differ = SimilarDiffer::new(DiffOptions {
            algorithm,
            timeout_ms: None,
        });
        let engine = DiffEngine::with_differ(&differ);

        println!("== algorithm={algorithm:?} ==");
        if let Some(stats) = engine.stats(old, new) {
            println!(
                "+{} -{} ={}",
                stats.added, stats.removed, stats.unchanged
            );
        }

        for line in engine.unified(old, new) {
            let old_no = line.old_line.map(|n| n.to_string()).unwrap_or_default();
            let new_no = line.new_line.map(|n| n.to_string()).unwrap_or_default();
            println!(
                "{} {old_no:>4} {new_no:>4} | {}",
                line.marker.as_char(),
                line.text
            );
        }
        println!();

        let view = engine.side_by_side(old, new);
        for row in view.rows().unwrap_or_default() {
            println!("{:<48} || {}", render_cell(&row.left), render_cell(&row.right));
        }
        println!();
    }

    let fallback = DiffEngine::without_differ().side_by_side(old, new);
    println!("== no differ ==");
    println!("{}", confdiff::html::side_by_side_html(&fallback));
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Placeholder => String::new(),
        Cell::Line {
            line_no,
            text,
            highlighted,
        } => {
            let marker = if *highlighted { '*' } else { ' ' };
            format!("{marker}{line_no:>3} {text}")
        }
    }
}
