use std::{
    cell::RefCell,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use videobridge::{
    AssetResolver, CanvasSize, DirectoryAssets, ExportOutput, HeadlessEditor, MethodCall,
    OpenEditorArgs, Reply, ResponseHandle, TerminalEvent, VideoCompositionBuilder,
    VideoEditorController,
};

#[derive(Parser, Debug)]
#[command(name = "videobridge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the `video` argument of an `openEditor` request and print the composition.
    Check(CheckArgs),
    /// Run an `openEditor` request against a headless editor and print the reply.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// `openEditor` arguments as JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory serving as the embedded asset bundle.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// `openEditor` arguments as JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory serving as the embedded asset bundle.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// How the headless editor ends the session.
    #[arg(long, value_enum, default_value_t = Outcome::Succeed)]
    outcome: Outcome,

    /// Serialized edit state the editor reports on success.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Output video location reported on success.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Outcome {
    Succeed,
    Fail,
    Cancel,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let f = File::open(path).with_context(|| format!("open request '{}'", path.display()))?;
    let v = serde_json::from_reader(BufReader::new(f)).with_context(|| "parse request JSON")?;
    Ok(v)
}

fn make_resolver(assets: Option<&Path>) -> AssetResolver {
    match assets {
        Some(root) => AssetResolver::new(DirectoryAssets::new(root)),
        None => AssetResolver::default(),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let raw = read_json(&args.in_path)?;
    let request: OpenEditorArgs =
        serde_json::from_value(raw).with_context(|| "decode openEditor arguments")?;
    let video = request.video.unwrap_or_default();

    let resolver = make_resolver(args.assets.as_deref());
    let comp = VideoCompositionBuilder::new(&resolver)
        .build(video.description().as_ref(), video.size.as_ref())?;

    let out = serde_json::json!({
        "segments": comp.segment_specs(),
        "size": comp.size(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let arguments = read_json(&args.in_path)?;

    let mut editor = HeadlessEditor::new();
    if let Some(state) = &args.state {
        editor.state = Some(
            std::fs::read(state).with_context(|| format!("read state '{}'", state.display()))?,
        );
    }

    let resolver = make_resolver(args.assets.as_deref());
    let mut controller = VideoEditorController::new(editor, resolver);
    let reply: Rc<RefCell<Option<Reply>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&reply);
    controller.handle(
        MethodCall::new("openEditor", arguments),
        ResponseHandle::new(move |r| *sink.borrow_mut() = Some(r)),
    );

    if let Some(session) = controller.active_session() {
        let event = match args.outcome {
            Outcome::Cancel => TerminalEvent::Cancelled,
            Outcome::Fail => {
                TerminalEvent::Failed("export failed in headless editor".to_string())
            }
            Outcome::Succeed => {
                let presented = controller
                    .editor()
                    .presentations()
                    .last()
                    .context("editor was never presented")?;
                let size = presented.canvas.unwrap_or(CanvasSize {
                    width: 1920.0,
                    height: 1080.0,
                });
                let out = args.out.clone().unwrap_or_else(|| {
                    std::env::temp_dir().join(format!("{session}.{}", presented.format.extension()))
                });
                let out = std::path::absolute(&out)?;
                let video = url::Url::from_file_path(&out)
                    .map_err(|()| anyhow::anyhow!("'{}' has no file URL", out.display()))?;
                TerminalEvent::Succeeded(ExportOutput {
                    video,
                    has_changes: true,
                    size,
                    segments: None,
                })
            }
        };
        controller.complete(event);
    }

    let reply = reply.borrow_mut().take().context("request was never answered")?;
    match reply {
        Ok(v) => println!("{}", serde_json::to_string_pretty(&v.unwrap_or(Value::Null))?),
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&e)?);
            anyhow::bail!(e);
        }
    }
    Ok(())
}
