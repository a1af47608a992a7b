//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::{Node, Operation, Outline, README_FILE};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print diff addition (green +)
pub fn diff_add(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "+".green(), msg);
}

/// Print diff change (yellow ~)
pub fn diff_change(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "~".yellow(), msg);
}

/// Print diff removal (red -)
pub fn diff_remove(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "-".red(), msg);
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Progress line for a completed operation.
pub fn step(operation: &Operation<'_>) {
    let label = if operation.is_dir() { "dir " } else { "file" };
    action(label, &operation.path().display());
}

/// Planned operation (dry run), uncolored verb.
pub fn planned(operation: &Operation<'_>) {
    match operation {
        Operation::CreateDir(path) => detail(&format!("mkdir {}", path.display())),
        Operation::WriteFile { path, content } => detail(&format!(
            "write {} ({} bytes)",
            path.display(),
            content.len()
        )),
    }
}

/// Render the tree an outline produces under `root_label`.
pub fn outline_tree(root_label: &str, outline: &Outline) -> Tree<String> {
    let mut tree = Tree::new(root_label.to_string());
    tree.push(Tree::new(README_FILE.to_string()));
    for node in outline.nodes() {
        tree.push(node_tree(node));
    }
    tree
}

fn node_tree(node: &Node) -> Tree<String> {
    let label = if node.is_leaf() {
        node.name().to_string()
    } else {
        format!("{}/", node.name())
    };
    Tree::new(label).with_leaves(node.children().iter().map(node_tree))
}
