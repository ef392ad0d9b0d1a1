use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use env_logger::Env;
use picker::{FileSource, FolderId, ItemId, ItemSelector, PickerConfig};
use picker_ui_tree::{RowAction, TreeView};

const SAMPLE_PAYLOAD: &str = "examples/response.json";

/// Usage: `render_tree [--config FILE] [PAYLOAD] [ACTION...]`
///
/// Actions: `item:<id>`, `folder:<id>`, `expand:<id>`, `clear`.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let mut config_path: Option<PathBuf> = None;
    let mut payload_path: Option<PathBuf> = None;
    let mut actions = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args.next().context("--config expects a path")?;
            config_path = Some(PathBuf::from(path));
        } else if arg == "clear" || arg.contains(':') {
            actions.push(parse_action(&arg)?);
        } else if payload_path.is_none() {
            payload_path = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected argument `{arg}`");
        }
    }

    let config = match &config_path {
        Some(path) => PickerConfig::load_from(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => PickerConfig::default(),
    };
    let source = FileSource::new(payload_path.unwrap_or_else(|| {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(SAMPLE_PAYLOAD)
    }));
    log::info!("loading items from {}", source.path().display());

    let mut selector = ItemSelector::new(config);
    selector.load(&source);
    let indent_width = selector.config().indent_width;

    if let Some(status) = selector.status_line() {
        println!("{status}");
        return Ok(());
    }

    let Some(session) = selector.session_mut() else {
        bail!("selector finished loading without a session");
    };
    for action in actions {
        log::info!("applying {action:?}");
        action.apply(session);
    }

    println!("{}", TreeView::new(session).indent_width(indent_width).view());
    Ok(())
}

fn parse_action(arg: &str) -> anyhow::Result<RowAction> {
    if arg == "clear" {
        return Ok(RowAction::ClearSelection);
    }

    let (kind, id) = arg
        .split_once(':')
        .with_context(|| format!("malformed action `{arg}`"))?;
    let id: i64 = id
        .parse()
        .with_context(|| format!("invalid id in action `{arg}`"))?;

    match kind {
        "item" => Ok(RowAction::ToggleItem(ItemId(id))),
        "folder" => Ok(RowAction::ToggleFolderRow(FolderId(id))),
        "expand" => Ok(RowAction::ToggleFolderExpand(FolderId(id))),
        _ => bail!("unknown action `{kind}`"),
    }
}
