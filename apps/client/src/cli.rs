//! `naviq` command line: one subcommand per page, plus theme, ambient effects,
//! an interactive shell and admin writes.

use std::io::Write;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::api::types::{
    Ack, Difficulty, Insight, InsightCategory, InsightInput, QuestionInput, RoleInput, StudyResourceInput,
    StudyTopicInput,
};
use crate::api::ApiClient;
use crate::app::runtime::Runtime;
use crate::app::{AppState, Msg, Screen, ROADMAP_DAY_OPTIONS};
use crate::canvas::blobs::GradientBlobs;
use crate::canvas::orbs::{OrbScene, OrbVariant};
use crate::canvas::particles::ParticleField;
use crate::canvas::waves::WaveLayers;
use crate::canvas::{CharGrid, Effect, Point, Rgba};
use crate::chat;
use crate::config::ClientConfig;
use crate::theme::{detect_system_dark, FileThemeStore, ThemePreference};
use crate::view::{pages, render_text, DEFAULT_WIDTH};

#[derive(Debug, Parser)]
#[command(name = "naviq")]
#[command(about = "NAVIQ career guide in the terminal", version)]
pub struct Cli {
    /// Base URL of the NAVIQ API (overrides NAVIQ_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Text width for rendered pages
    #[arg(long, global = true, default_value_t = DEFAULT_WIDTH)]
    pub cols: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Landing page with the career paths
    Home,
    /// Day-by-day roadmap for a career goal
    Roadmap {
        #[arg(long)]
        goal: Option<String>,
        /// 30, 60 or 90
        #[arg(long)]
        days: Option<u32>,
        /// Milestone to expand, starting at 1
        #[arg(long)]
        step: Option<usize>,
    },
    /// Interview questions for a role
    Interview {
        #[arg(long)]
        role: String,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Reveal every answer
        #[arg(long)]
        expand: bool,
    },
    /// Study topics and their resources
    Study {
        /// Topic id or title to open
        #[arg(long)]
        topic: Option<String>,
    },
    /// Readiness, velocity and market insights
    Insights {
        #[arg(long)]
        category: Option<InsightCategory>,
    },
    /// Chat with the career guide; without --message, starts a prompt
    Guide {
        #[arg(long)]
        message: Option<String>,
    },
    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Check that the API is reachable
    Health,
    /// Render a background effect as ASCII
    Ambient(AmbientArgs),
    /// Interactive session over every page
    Shell,
    /// Catalog writes through the API
    Admin {
        #[command(subcommand)]
        target: AdminTarget,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ThemeAction {
    Show,
    /// Switch to the opposite of what is shown now
    Toggle,
    /// system → light → dark
    Cycle,
    Set { preference: ThemePreference },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EffectKind {
    Particles,
    Blobs,
    Waves,
    Orbs,
}

#[derive(Debug, Args)]
pub struct AmbientArgs {
    #[arg(value_enum)]
    pub effect: EffectKind,
    /// Frames to simulate before the (last) draw
    #[arg(long, default_value_t = 1)]
    pub frames: u32,
    /// Virtual canvas width in pixels
    #[arg(long, default_value_t = 1200.0)]
    pub width: f64,
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,
    /// Scene variant for orbs: hero, minimal or stars
    #[arg(long, default_value_t = OrbVariant::Hero)]
    pub variant: OrbVariant,
    /// Wave colour as #rrggbb
    #[arg(long, default_value = "#7f9a7d")]
    pub color: String,
    /// Pointer position as x,y for the particle field
    #[arg(long)]
    pub pointer: Option<String>,
    /// Redraw every frame instead of printing only the last one
    #[arg(long)]
    pub animate: bool,
}

#[derive(Debug, Subcommand)]
pub enum AdminTarget {
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },
    Question {
        #[command(subcommand)]
        action: QuestionAction,
    },
    Insight {
        #[command(subcommand)]
        action: InsightAction,
    },
    Topic {
        #[command(subcommand)]
        action: TopicAction,
    },
}

#[derive(Debug, Args)]
pub struct RoleFields {
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum RoleAction {
    Create {
        name: String,
        #[command(flatten)]
        fields: RoleFields,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: RoleFields,
    },
    /// Also removes the role's questions
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct QuestionFields {
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
    #[arg(long)]
    pub answer: Option<String>,
    #[arg(long)]
    pub focus: Option<String>,
    #[arg(long)]
    pub follow_up: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum QuestionAction {
    Create {
        #[arg(long)]
        role_id: i64,
        question: String,
        #[command(flatten)]
        fields: QuestionFields,
    },
    Update {
        id: i64,
        #[arg(long)]
        question: Option<String>,
        #[command(flatten)]
        fields: QuestionFields,
    },
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct InsightFields {
    #[arg(long)]
    pub value: Option<String>,
    #[arg(long)]
    pub meta: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum InsightAction {
    /// Print one category with ids, for picking what to update
    List {
        #[arg(long)]
        category: InsightCategory,
    },
    Create {
        category: InsightCategory,
        label: String,
        #[command(flatten)]
        fields: InsightFields,
    },
    Update {
        id: i64,
        #[arg(long)]
        category: Option<InsightCategory>,
        #[arg(long)]
        label: Option<String>,
        #[command(flatten)]
        fields: InsightFields,
    },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum TopicAction {
    Create {
        title: String,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        subhead: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// `type|title|detail|url`; repeat for several resources
        #[arg(long = "resource")]
        resources: Vec<String>,
    },
    /// Also removes the topic's resources
    Delete { id: i64 },
}

pub async fn run(cli: Cli, config: ClientConfig) -> Result<()> {
    let api = ApiClient::new(cli.api_url.clone().unwrap_or(config.api_url));
    let store = FileThemeStore::in_dir(&config.home);
    let cols = cli.cols;
    info!("Using API at {}", api.base_url());

    match cli.command {
        Command::Health => {
            let health = api.health().await?;
            println!("{}: {} (v{})", health.status, health.message, health.version);
        }
        Command::Admin { target } => {
            if let Some(ack) = admin(&api, target).await? {
                match ack.id {
                    Some(id) => println!("{} (id {id})", ack.message),
                    None => println!("{}", ack.message),
                }
            }
        }
        Command::Ambient(args) => ambient(args, cols).await?,
        command => {
            let mut runtime = Runtime::new(api, store, detect_system_dark());
            page(&mut runtime, command, cols).await?;
        }
    }
    Ok(())
}

type ClientRuntime = Runtime<ApiClient, FileThemeStore>;

fn print_view(state: &AppState, cols: usize) {
    println!("{}", render_text(&pages::view(state), cols));
}

async fn page(runtime: &mut ClientRuntime, command: Command, cols: usize) -> Result<()> {
    match command {
        Command::Home => runtime.start().await,
        Command::Roadmap { goal, days, step } => {
            runtime.dispatch(Msg::Navigate(Screen::Roadmap)).await;
            if let Some(days) = days {
                if !ROADMAP_DAY_OPTIONS.contains(&days) {
                    bail!("--days must be one of {ROADMAP_DAY_OPTIONS:?}");
                }
                runtime.dispatch(Msg::SetDays(days)).await;
            }
            if let Some(goal) = goal {
                runtime.dispatch(Msg::SelectGoal(goal)).await;
            }
            if let Some(step) = step {
                runtime.dispatch(Msg::StepTo(step.saturating_sub(1))).await;
            }
        }
        Command::Interview {
            role,
            difficulty,
            expand,
        } => {
            runtime.dispatch(Msg::Navigate(Screen::Interview)).await;
            runtime.dispatch(Msg::SelectRole(role)).await;
            runtime.dispatch(Msg::SetDifficultyFilter(difficulty)).await;
            if expand {
                runtime.dispatch(Msg::ExpandAll).await;
            }
        }
        Command::Study { topic } => {
            runtime.dispatch(Msg::Navigate(Screen::Study)).await;
            if let Some(wanted) = topic {
                let id = find_topic(runtime.state(), &wanted)
                    .ok_or_else(|| anyhow!("No study topic matches '{wanted}'"))?;
                if runtime.state().study.active_topic != Some(id) {
                    runtime.dispatch(Msg::SelectTopic(id)).await;
                }
            }
        }
        Command::Insights { category } => {
            runtime.dispatch(Msg::Navigate(Screen::Insights)).await;
            if let Some(category) = category {
                runtime.dispatch(Msg::SelectInsightTab(category)).await;
            }
        }
        Command::Guide { message } => {
            runtime.dispatch(Msg::Navigate(Screen::Guide)).await;
            match message {
                Some(message) => runtime.dispatch(Msg::SubmitChat(message)).await,
                None => return guide_prompt(runtime).await,
            }
        }
        Command::Theme { action } => {
            let msg = match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => None,
                ThemeAction::Toggle => Some(Msg::ToggleTheme),
                ThemeAction::Cycle => Some(Msg::CycleTheme),
                ThemeAction::Set { preference } => Some(Msg::SetTheme(preference)),
            };
            if let Some(msg) = msg {
                runtime.dispatch(msg).await;
            }
            let state = runtime.state();
            println!(
                "Theme: {} (showing {})",
                state.theme.label(),
                state.theme_mode().as_str()
            );
            return Ok(());
        }
        Command::Shell => return shell(runtime, cols).await,
        other => bail!("{other:?} does not render a page"),
    }
    print_view(runtime.state(), cols);
    Ok(())
}

/// Matches a topic by id or by case-insensitive title.
fn find_topic(state: &AppState, wanted: &str) -> Option<i64> {
    let topics = &state.study.topics;
    if let Ok(id) = wanted.trim().parse::<i64>() {
        if topics.iter().any(|t| t.id == id) {
            return Some(id);
        }
    }
    topics
        .iter()
        .find(|t| t.title.eq_ignore_ascii_case(wanted.trim()))
        .map(|t| t.id)
}

async fn guide_prompt(runtime: &mut ClientRuntime) -> Result<()> {
    println!("{}\n", chat::GREETING);
    println!("Try: {}", chat::PROMPT_CHIPS.join(" | "));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        runtime.dispatch(Msg::SubmitChat(line)).await;
        if let Some(reply) = runtime.state().chat.messages().last() {
            println!("\n{}\n", reply.text);
        }
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Shell
// ──────────────────────────────────────────────

const SHELL_HELP: &str = "Commands:
  go <home|roadmap|study|interview|insights|guide>
  goal <name>        days <30|60|90>      next | prev | step <n>
  role <name>        filter <all|beginner|intermediate|advanced>
  open <id>          expand | collapse
  topic <id>         tab <readiness|velocity|market>
  say <message>      theme <toggle|cycle|light|dark|system>
  refresh            help                 quit";

#[derive(Debug)]
pub enum ShellInput {
    Msg(Msg),
    Help,
    Quit,
}

/// One shell line to a message. Errors are shown to the user as-is.
pub fn parse_shell_line(line: &str) -> Result<Option<ShellInput>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let need = |what: &str| required(verb, rest, what);

    let msg = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Some(ShellInput::Help)),
        "quit" | "exit" | "q" => return Ok(Some(ShellInput::Quit)),
        "go" => Msg::Navigate(need("a screen")?.parse()?),
        "refresh" => Msg::Refresh,
        "goal" => Msg::SelectGoal(need("a goal")?.to_string()),
        "days" => Msg::SetDays(
            need("a number of days")?
                .parse()
                .map_err(|_| format!("'{rest}' is not a number of days"))?,
        ),
        "next" => Msg::StepNext,
        "prev" => Msg::StepPrev,
        "step" => {
            let n: usize = need("a step number")?
                .parse()
                .map_err(|_| format!("'{rest}' is not a step number"))?;
            Msg::StepTo(n.saturating_sub(1))
        }
        "role" => Msg::SelectRole(need("a role")?.to_string()),
        "filter" => match need("a difficulty")?.to_ascii_lowercase().as_str() {
            "all" => Msg::SetDifficultyFilter(None),
            other => Msg::SetDifficultyFilter(Some(other.parse()?)),
        },
        "open" => Msg::ToggleQuestion(
            need("a question id")?
                .parse()
                .map_err(|_| format!("'{rest}' is not a question id"))?,
        ),
        "expand" => Msg::ExpandAll,
        "collapse" => Msg::CollapseAll,
        "topic" => Msg::SelectTopic(
            need("a topic id")?
                .parse()
                .map_err(|_| format!("'{rest}' is not a topic id"))?,
        ),
        "tab" => Msg::SelectInsightTab(need("a category")?.parse()?),
        "say" => Msg::SubmitChat(need("a message")?.to_string()),
        "theme" => match need("toggle, cycle, or a preference")? {
            "toggle" => Msg::ToggleTheme,
            "cycle" => Msg::CycleTheme,
            pref => Msg::SetTheme(pref.parse()?),
        },
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(ShellInput::Msg(msg)))
}

fn required<'a>(verb: &str, rest: &'a str, what: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("'{verb}' needs {what}"))
    } else {
        Ok(rest)
    }
}

async fn shell(runtime: &mut ClientRuntime, cols: usize) -> Result<()> {
    runtime.start().await;
    print_view(runtime.state(), cols);
    println!("\n{SHELL_HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("naviq> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_shell_line(&line) {
            Ok(None) => {}
            Ok(Some(ShellInput::Quit)) => break,
            Ok(Some(ShellInput::Help)) => println!("{SHELL_HELP}"),
            Ok(Some(ShellInput::Msg(msg))) => {
                runtime.dispatch(msg).await;
                print_view(runtime.state(), cols);
            }
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Ambient
// ──────────────────────────────────────────────

fn parse_pointer(raw: &str) -> Result<Point> {
    let (x, y) = raw
        .split_once(',')
        .with_context(|| format!("pointer '{raw}' must look like x,y"))?;
    Ok(Point::new(
        x.trim().parse().with_context(|| format!("bad pointer x in '{raw}'"))?,
        y.trim().parse().with_context(|| format!("bad pointer y in '{raw}'"))?,
    ))
}

fn build_effect(args: &AmbientArgs) -> Result<Box<dyn Effect>> {
    let effect: Box<dyn Effect> = match args.effect {
        EffectKind::Particles => Box::<ParticleField>::default(),
        EffectKind::Blobs => Box::<GradientBlobs>::default(),
        EffectKind::Waves => {
            let color = Rgba::from_hex(&args.color)?;
            Box::new(WaveLayers::new(color))
        }
        EffectKind::Orbs => Box::new(OrbScene::new(args.variant)),
    };
    Ok(effect)
}

const MAX_GRID_COLS: usize = 400;
const MAX_GRID_ROWS: usize = 200;

/// Character grid for a `width` x `height` canvas, bounded for any aspect ratio.
fn grid_size(cols: usize, width: f64, height: f64) -> (usize, usize) {
    let cols = cols.clamp(1, MAX_GRID_COLS);
    // Terminal cells are roughly twice as tall as wide.
    let rows = (cols as f64 * height / width / 2.0).round();
    let rows = if rows.is_finite() {
        rows.clamp(1.0, MAX_GRID_ROWS as f64) as usize
    } else {
        MAX_GRID_ROWS
    };
    (cols, rows)
}

async fn ambient(args: AmbientArgs, cols: usize) -> Result<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(args.width) || !valid(args.height) {
        bail!("--width and --height must be positive numbers");
    }
    let mut effect = build_effect(&args)?;
    effect.resize(args.width, args.height);
    if let Some(raw) = &args.pointer {
        effect.set_pointer(Some(parse_pointer(raw)?));
    }

    let (cols, rows) = grid_size(cols, args.width, args.height);
    let mut grid = CharGrid::new(cols, rows, args.width, args.height);
    info!("Rendering {} at {cols}x{rows} for {} frames", effect.name(), args.frames);

    for frame in 0..args.frames.max(1) {
        if frame > 0 {
            effect.step();
        }
        if args.animate {
            effect.draw(&mut grid);
            print!("\x1b[H\x1b[2J{grid}");
            std::io::stdout().flush()?;
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    }
    if !args.animate {
        effect.draw(&mut grid);
        print!("{grid}");
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Admin
// ──────────────────────────────────────────────

/// `type|title|detail|url`; only the title is required.
fn parse_resource(raw: &str) -> Result<StudyResourceInput> {
    let mut parts = raw.split('|').map(str::trim);
    let kind = parts.next().filter(|s| !s.is_empty()).map(String::from);
    let title = parts
        .next()
        .filter(|s| !s.is_empty())
        .with_context(|| format!("resource '{raw}' needs a title: type|title|detail|url"))?
        .to_string();
    let detail = parts.next().filter(|s| !s.is_empty()).map(String::from);
    let url = parts.next().filter(|s| !s.is_empty()).map(String::from);
    Ok(StudyResourceInput {
        kind,
        title,
        detail,
        url,
    })
}

fn insight_line(insight: &Insight) -> String {
    let mut line = format!("#{} {}", insight.id, insight.label);
    if !insight.value.is_empty() {
        line.push_str(&format!(": {}", insight.value));
    }
    if !insight.meta.is_empty() {
        line.push_str(&format!(" ({})", insight.meta));
    }
    line
}

/// Writes return the server's acknowledgement; `insight list` prints and returns `None`.
async fn admin(api: &ApiClient, target: AdminTarget) -> Result<Option<Ack>> {
    let ack = match target {
        AdminTarget::Role { action } => match action {
            RoleAction::Create { name, fields } => {
                api.create_role(&RoleInput {
                    name: Some(name),
                    description: fields.description,
                    icon: fields.icon,
                    color: fields.color,
                })
                .await?
            }
            RoleAction::Update { id, name, fields } => {
                api.update_role(
                    id,
                    &RoleInput {
                        name,
                        description: fields.description,
                        icon: fields.icon,
                        color: fields.color,
                    },
                )
                .await?
            }
            RoleAction::Delete { id } => api.delete_role(id).await?,
        },
        AdminTarget::Question { action } => match action {
            QuestionAction::Create {
                role_id,
                question,
                fields,
            } => {
                api.create_question(&QuestionInput {
                    role_id: Some(role_id),
                    question: Some(question),
                    difficulty: fields.difficulty.map(|d| d.as_str().to_string()),
                    answer: fields.answer,
                    focus: fields.focus,
                    follow_up: fields.follow_up,
                })
                .await?
            }
            QuestionAction::Update {
                id,
                question,
                fields,
            } => {
                api.update_question(
                    id,
                    &QuestionInput {
                        role_id: None,
                        question,
                        difficulty: fields.difficulty.map(|d| d.as_str().to_string()),
                        answer: fields.answer,
                        focus: fields.focus,
                        follow_up: fields.follow_up,
                    },
                )
                .await?
            }
            QuestionAction::Delete { id } => api.delete_question(id).await?,
        },
        AdminTarget::Insight { action } => match action {
            InsightAction::List { category } => {
                let insights = api.insights_in(category).await?;
                if insights.is_empty() {
                    println!("No {} insights", category.as_str());
                }
                for insight in &insights {
                    println!("{}", insight_line(insight));
                }
                return Ok(None);
            }
            InsightAction::Create {
                category,
                label,
                fields,
            } => {
                api.create_insight(&InsightInput {
                    category: Some(category.as_str().to_string()),
                    label: Some(label),
                    value: fields.value,
                    meta: fields.meta,
                })
                .await?
            }
            InsightAction::Update {
                id,
                category,
                label,
                fields,
            } => {
                api.update_insight(
                    id,
                    &InsightInput {
                        category: category.map(|c| c.as_str().to_string()),
                        label,
                        value: fields.value,
                        meta: fields.meta,
                    },
                )
                .await?
            }
            InsightAction::Delete { id } => api.delete_insight(id).await?,
        },
        AdminTarget::Topic { action } => match action {
            TopicAction::Create {
                title,
                summary,
                subhead,
                icon,
                resources,
            } => {
                let resources = resources
                    .iter()
                    .map(|r| parse_resource(r))
                    .collect::<Result<Vec<_>>>()?;
                api.create_study_topic(&StudyTopicInput {
                    title,
                    summary,
                    subhead,
                    icon,
                    resources,
                })
                .await?
            }
            TopicAction::Delete { id } => api.delete_study_topic(id).await?,
        },
    };
    Ok(Some(ack))
}
