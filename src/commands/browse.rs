use anyhow::Result;
use arbor::presentation::output::{paths_to_json, render_paths, tree_to_json, TreeRenderer};

use super::{emit_complete, GlobalOptions, Session};
use crate::cli::ProjectArgs;

pub fn cmd_tree(project: &ProjectArgs, depth: Option<usize>, options: &GlobalOptions) -> Result<()> {
    let session = Session::open(project, options)?;
    let tree = session.browser.tree();
    let root = session.root_index();

    if options.json {
        emit_complete("tree", tree_to_json(tree, root))
    } else {
        let renderer = TreeRenderer { max_depth: depth };
        print!("{}", renderer.render_root(tree, root));
        Ok(())
    }
}

pub fn cmd_find(project: &ProjectArgs, query: &str, options: &GlobalOptions) -> Result<()> {
    let mut session = Session::open(project, options)?;
    session.browser.set_filter(query);
    let matches = session.browser.filtered_paths();
    let tree = session.browser.tree();

    if options.json {
        emit_complete(
            "find",
            serde_json::json!({
                "query": query,
                "matches": paths_to_json(tree, &matches),
            }),
        )
    } else {
        if matches.is_empty() {
            eprintln!("No entries matching '{}' in {}", query, session.root_name());
        }
        print!("{}", render_paths(tree, &matches));
        Ok(())
    }
}
