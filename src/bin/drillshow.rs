use std::{cell::Cell, path::PathBuf, rc::Rc, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use drillshow::{
    AnimationStateDelegate, AnimatorEvent, AudioPlayer, MovementViewport, MusicAnimator, Show,
    SimulatedAudio, TimedBeats, ViewportConfig,
};

#[derive(Parser, Debug)]
#[command(name = "drillshow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print dot positions at one moment as JSON.
    State(StateArgs),
    /// Print the continuity lines of one dot on one sheet.
    Continuity(DotArgs),
    /// Print the framing window for one dot's movement on one sheet as JSON.
    Viewport(ViewportArgs),
    /// Simulate music-synchronized playback and print every displayed beat.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct StateArgs {
    /// Input show JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sheet index (0-based).
    #[arg(long, default_value_t = 0)]
    sheet: usize,

    /// Beat within the sheet (0-based).
    #[arg(long, default_value_t = 0)]
    beat: u32,

    /// Only report this dot.
    #[arg(long)]
    dot: Option<String>,
}

#[derive(Parser, Debug)]
struct DotArgs {
    /// Input show JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sheet index (0-based).
    #[arg(long, default_value_t = 0)]
    sheet: usize,

    /// Dot label.
    #[arg(long)]
    dot: String,
}

#[derive(Parser, Debug)]
struct ViewportArgs {
    #[command(flatten)]
    dot: DotArgs,

    /// Container height / width.
    #[arg(long, default_value_t = 0.75)]
    aspect: f64,

    /// Smallest frame width in steps.
    #[arg(long, default_value_t = 20.0)]
    min_steps: f64,

    /// Steps of margin around the path.
    #[arg(long, default_value_t = 4.0)]
    margin: f64,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input show JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Milliseconds per beat.
    #[arg(long, default_value_t = 500.0)]
    beat_ms: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::State(args) => cmd_state(args),
        Command::Continuity(args) => cmd_continuity(args),
        Command::Viewport(args) => cmd_viewport(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_show(path: &std::path::Path) -> anyhow::Result<Show> {
    Show::from_path(path).with_context(|| format!("load show '{}'", path.display()))
}

fn cmd_state(args: StateArgs) -> anyhow::Result<()> {
    let show = load_show(&args.in_path)?;
    let mut nav = AnimationStateDelegate::new(Arc::new(show));
    nav.goto(args.sheet, args.beat);

    let states: Vec<_> = match args.dot.as_deref() {
        Some(label) => {
            nav.select_dot(label);
            let state = nav
                .selected_dot_state()
                .with_context(|| format!("dot '{label}' has no state on this sheet"))?;
            vec![(label, state)]
        }
        None => nav.current_dot_states(),
    };

    let out = serde_json::json!({
        "sheet": nav.current_sheet_index(),
        "beat": nav.current_beat(),
        "dots": states
            .iter()
            .map(|(label, s)| serde_json::json!({ "label": label, "x": s.x, "y": s.y, "angle": s.angle }))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn find_dot<'a>(show: &'a Show, args: &DotArgs) -> anyhow::Result<&'a drillshow::Dot> {
    let sheet = show
        .sheets
        .get(args.sheet)
        .with_context(|| format!("sheet {} does not exist", args.sheet))?;
    sheet
        .dot_by_label(&args.dot)
        .with_context(|| format!("dot '{}' is not on sheet {}", args.dot, args.sheet))
}

fn cmd_continuity(args: DotArgs) -> anyhow::Result<()> {
    let show = load_show(&args.in_path)?;
    let dot = find_dot(&show, &args)?;
    for line in dot.continuity() {
        println!("{line}");
    }
    Ok(())
}

fn cmd_viewport(args: ViewportArgs) -> anyhow::Result<()> {
    let show = load_show(&args.dot.in_path)?;
    let dot = find_dot(&show, &args.dot)?;
    let start = dot
        .start_pos()
        .with_context(|| format!("dot '{}' has no movement", dot.label))?;
    let config = ViewportConfig {
        min_steps_visible: args.min_steps,
        margin: args.margin,
    };
    let vp = MovementViewport::fit(start, &dot.movement_path(), args.aspect, &config)?;
    println!("{}", serde_json::to_string_pretty(&vp)?);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.beat_ms.is_finite() && args.beat_ms > 0.0,
        "--beat-ms must be > 0"
    );
    let show = load_show(&args.in_path)?;
    let total = usize::try_from(show.total_beats()).context("show is too long")?;
    let beats = TimedBeats::from_tempo(60_000.0 / args.beat_ms, total)?;
    let times = beats.times().to_vec();

    let mut audio = SimulatedAudio::new(times.last().copied().unwrap_or(0.0) + args.beat_ms);
    audio.load(&args.in_path.to_string_lossy())?;

    let mut animator = MusicAnimator::new();
    let finished = Rc::new(Cell::new(false));
    let flag = Rc::clone(&finished);
    animator.on(AnimatorEvent::Finished, move || flag.set(true));
    animator.set_animation_state_delegate(AnimationStateDelegate::new(Arc::new(show)));
    animator.set_beats(beats);
    animator.set_music(audio);
    animator.update();

    animator.start()?;
    animator.update();
    print_moment(&animator, 0.0);
    for &t in times.iter().skip(1) {
        if finished.get() {
            break;
        }
        if let Some(music) = animator.music_mut() {
            music.advance_to(t);
        }
        animator.update();
        print_moment(&animator, t);
    }
    println!("finished");
    Ok(())
}

fn print_moment(animator: &MusicAnimator<SimulatedAudio>, time_ms: f64) {
    if let Some(nav) = animator.delegate() {
        println!(
            "{time_ms:>8.1} ms  sheet {:>3}  beat {:>3}",
            nav.current_sheet_index(),
            nav.current_beat()
        );
    }
}
