use anyhow::{Context, Result, bail};
use markdown_livedit_config::Config;
use markdown_livedit_engine::{
    CaretSearch, ContentUpdater, Dom, EditorSession, Range, SelectionService, UpdateReport,
    capture_offset, locate, render_markdown,
};
use std::{env, fmt::Write, fs, path::Path, process};

fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {program} render <file.md>");
    eprintln!("  {program} replay <old.md> <offset> [new.md]");
    eprintln!(
        "Settings are read from {} if present",
        Config::config_path().display()
    );
    process::exit(1);
}

fn read_source(path: &str) -> Result<String> {
    fs::read_to_string(Path::new(path)).with_context(|| format!("Failed to read {path}"))
}

/// Source-preserving HTML for a markdown file.
fn render(config: &Config, path: &str) -> Result<String> {
    let source = read_source(path)?;
    Ok(render_markdown(&source, &config.render))
}

/// Render `old_source`, put the caret `offset` characters in, re-render with
/// `new_source` and describe where the caret ended up.
fn replay(config: &Config, old_source: &str, offset: usize, new_source: &str) -> Result<String> {
    let updater: ContentUpdater =
        ContentUpdater::default().with_overflow_policy(config.editor.overflow);
    let mut session: EditorSession =
        EditorSession::with_suffix("replay", &config.editor.id_suffix, updater)
            .with_render_options(config.render);

    let mut dom = Dom::new();
    let root = dom.root();
    let editor = session.mount(&mut dom, root);
    dom.set_inner_html(editor, &render_markdown(old_source, &config.render));

    let CaretSearch::Found(point) = locate(&dom, editor, offset) else {
        bail!(
            "Offset {offset} is past the end of the old content ({} characters)",
            dom.text_len(editor)
        );
    };
    session
        .updater_mut()
        .selection_mut()
        .set_single_range(Range::collapsed_at(point));

    let editor_id = session.editor_id().to_string();
    let html = render_markdown(new_source, &config.render);
    let report: UpdateReport = session
        .updater_mut()
        .update(&mut dom, &editor_id, &html)
        .with_context(|| format!("Failed to update {editor_id}"))?;

    let restored = capture_offset(&dom, editor, session.updater().selection());
    let text = dom.text_content(editor);
    let split = text
        .char_indices()
        .nth(restored)
        .map_or(text.len(), |(i, _)| i);

    let mut out = String::new();
    writeln!(out, "captured offset: {}", report.offset)?;
    writeln!(out, "placement: {:?}", report.placement)?;
    writeln!(out, "restored offset: {restored}")?;
    write!(out, "{}|{}", &text[..split], &text[split..])?;
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("markdown-livedit", String::as_str);
    let config = Config::load_or_default();

    match args.get(1).map(String::as_str) {
        Some("render") if args.len() == 3 => {
            println!("{}", render(&config, &args[2])?);
            Ok(())
        }
        Some("replay") if args.len() == 4 || args.len() == 5 => {
            let offset: usize = match args[3].parse() {
                Ok(offset) => offset,
                Err(e) => {
                    eprintln!("Error: invalid offset '{}': {e}", args[3]);
                    usage(program);
                }
            };
            let old_source = read_source(&args[2])?;
            let new_source = match args.get(4) {
                Some(new_path) => read_source(new_path)?,
                None => old_source.clone(),
            };
            println!("{}", replay(&config, &old_source, offset, &new_source)?);
            Ok(())
        }
        _ => usage(program),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_livedit_engine::OverflowPolicy;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_render_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("note.md");
        fs::write(&path, "# Hi").unwrap();

        let html = render(&Config::default(), &path.to_string_lossy()).unwrap();

        assert_eq!(html, "<h1># Hi</h1>");
    }

    #[test]
    fn test_render_missing_file_names_it() {
        let err = render(&Config::default(), "/no/such/note.md").unwrap_err();

        assert!(err.to_string().contains("/no/such/note.md"));
    }

    #[test]
    fn test_replay_same_content_keeps_caret() {
        let out = replay(&Config::default(), "some *text*", 6, "some *text*").unwrap();

        assert_eq!(out.lines().next(), Some("captured offset: 6"));
        assert!(out.contains("\nrestored offset: 6\n"), "{out}");
        assert!(out.ends_with("some *|text*"), "{out}");
    }

    #[test]
    fn test_replay_growth_after_caret() {
        let out = replay(&Config::default(), "ab", 1, "aXXb").unwrap();

        assert!(out.ends_with("a|XXb"), "{out}");
    }

    #[test]
    fn test_replay_shrink_follows_overflow_policy() {
        let mut config = Config::default();
        let clamped = replay(&config, "hello world", 11, "hi").unwrap();
        assert!(clamped.ends_with("hi|"), "{clamped}");

        config.editor.overflow = OverflowPolicy::ContainerStart;
        let start = replay(&config, "hello world", 11, "hi").unwrap();
        assert!(start.ends_with("|hi"), "{start}");
        assert!(start.contains("restored offset: 0"), "{start}");
    }

    #[test]
    fn test_replay_offset_past_old_content_is_an_error() {
        let err = replay(&Config::default(), "ab", 5, "ab").unwrap_err();

        assert!(err.to_string().contains("Offset 5"), "{err}");
    }
}
