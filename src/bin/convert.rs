use std::io::{self, Read};
use std::process::ExitCode;

use drafty_format::LeafContent;

fn main() -> ExitCode {
    let mut json = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut json) {
        eprintln!("drafty-format: cannot read stdin: {err}");
        return ExitCode::FAILURE;
    }

    let node = match drafty_format::format_json(&json) {
        Ok(node) => node,
        Err(err) => {
            eprintln!("drafty-format: {err}");
            return ExitCode::FAILURE;
        }
    };

    for leaf in node.leaves() {
        let indent = "> ".repeat(leaf.quote_depth);
        match leaf.content {
            LeafContent::Text(text) => println!("{indent}{text:?} [{}]", leaf.style),
            LeafContent::Attachment(att) => {
                let reference = att.reference.as_deref().unwrap_or("-");
                println!("{indent}<{:?} {reference}> [{}]", att.kind, leaf.style);
            }
        }
    }
    ExitCode::SUCCESS
}
