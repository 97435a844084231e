use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;

use jsonq::app::{AppContext, Repl, Session, ViewMode, parse_filter, parse_selection, render_outcome};
use jsonq::builder::{BuilderConfig, Operation, SortDirection};
use jsonq::config;
use jsonq::export::ExportFormat;
use jsonq::input::InputReader;
use jsonq::notification::render_notification;
use jsonq::query::debouncer::Clock;

const WATCH_POLL: Duration = Duration::from_millis(100);

/// Query JSON with JMESPath expressions or builder flags
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Query JSON documents with JMESPath expressions or a visual query builder"
)]
struct Args {
    /// Input JSON file (if not provided, reads from stdin)
    input: Option<PathBuf>,

    /// Expression text to run instead of building one from flags
    #[arg(short, long, conflicts_with_all = ["select", "filters", "count", "sort_by", "op"])]
    query: Option<String>,

    /// Project a field, optionally renamed (repeatable, kept in order)
    #[arg(long = "select", value_name = "FIELD[=ALIAS]")]
    select: Vec<String>,

    /// Keep elements matching "FIELD OP VALUE" (repeatable, all must hold)
    #[arg(long = "where", value_name = "CONDITION")]
    filters: Vec<String>,

    /// Count matching elements
    #[arg(long)]
    count: bool,

    /// Sort by a field
    #[arg(long, value_name = "FIELD")]
    sort_by: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort_by")]
    desc: bool,

    /// Builder operation; inferred from the other flags when omitted
    #[arg(long, value_parser = parse_operation)]
    op: Option<Operation>,

    /// Result views to print
    #[arg(long, value_enum, default_value_t = ViewMode::Text)]
    view: ViewMode,

    /// Print the result in an export format instead of the views
    #[arg(long, value_enum)]
    export: Option<ExportFormat>,

    /// Write the export to a file
    #[arg(short, long, requires = "export")]
    output: Option<PathBuf>,

    /// Print the expression that would run, then exit
    #[arg(long)]
    print_query: bool,

    /// Run a shared query (link or bare parameter)
    #[arg(long, value_name = "PARAM|URL", conflicts_with = "query")]
    shared: Option<String>,

    /// Print a shareable link for the expression on this base URL, then exit
    #[arg(long, value_name = "URL")]
    share_base: Option<String>,

    /// Read commands and expressions line by line
    #[arg(short, long, conflicts_with = "watch")]
    interactive: bool,

    /// Re-run whenever the input file changes
    #[arg(long, requires = "input")]
    watch: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    s.parse()
}

fn main() -> Result<()> {
    init_logging();
    color_eyre::install()?;

    let args = Args::parse();

    let mut ctx = AppContext::new(config::load_config());
    if args.no_color || !io::stdout().is_terminal() {
        ctx.color = false;
    }

    let mut session = Session::new(ctx.debounce_ms());
    configure_query(&args, &mut session)?;

    if let Some(shared) = &args.shared {
        session.apply_shared(&mut ctx, shared);
    }

    if args.print_query || args.share_base.is_some() {
        return print_query(&args, &mut ctx, &session);
    }

    let result = if args.interactive {
        run_interactive(&args, &mut ctx, &mut session)
    } else if args.watch {
        run_watch(&args, &mut ctx, &mut session)
    } else {
        run_once(&args, &mut ctx, &mut session)
    };

    print_notifications(&mut ctx);
    result
}

/// Logs go to stderr; the filter comes from JSONQ_LOG and defaults to warn
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("JSONQ_LOG", "warn"))
        .format(|buf, record| {
            let datetime = chrono::Local::now();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// Install the query from `-q` or from the builder flags
fn configure_query(args: &Args, session: &mut Session) -> Result<()> {
    if let Some(query) = &args.query {
        session.set_query_text(query);
        return Ok(());
    }

    let mut config = BuilderConfig::default();
    config.selected_fields = args.select.iter().map(|s| parse_selection(s)).collect();
    config.filters = args
        .filters
        .iter()
        .map(|f| parse_filter(f))
        .collect::<Result<_, _>>()
        .map_err(|e| eyre!("invalid --where: {}", e))?;
    config.sort_field = args.sort_by.clone();
    if args.desc {
        config.sort_direction = SortDirection::Descending;
    }
    config.operation = args.op.unwrap_or_else(|| config.inferred_operation(args.count));

    session.builder_mut().load(config);
    Ok(())
}

fn print_query(args: &Args, ctx: &mut AppContext, session: &Session) -> Result<()> {
    if args.print_query {
        println!("{}", session.active_expression());
    }
    if let Some(base) = &args.share_base {
        if let Some(link) = session.share_link(ctx, base) {
            println!("{}", link);
        }
    }
    print_notifications(ctx);
    Ok(())
}

fn run_once(args: &Args, ctx: &mut AppContext, session: &mut Session) -> Result<()> {
    let text = InputReader::read_text(args.input.as_deref())?;
    if !session.load_document(ctx, &text) {
        return Err(eyre!("input is not valid JSON"));
    }

    let outcome = session.run(ctx).clone();
    if !outcome.is_success() {
        let message = outcome.status_message().unwrap_or_default();
        return Err(eyre!(message));
    }

    match args.export {
        Some(format) => match session.export(ctx, format, args.output.as_deref()) {
            Some(text) if args.output.is_none() => println!("{}", text),
            Some(_) => {}
            None => return Err(eyre!("export failed")),
        },
        None => println!("{}", render_outcome(&outcome, args.view, ctx.theme, ctx.color)),
    }
    Ok(())
}

fn run_interactive(args: &Args, ctx: &mut AppContext, session: &mut Session) -> Result<()> {
    if let Some(path) = &args.input {
        let text = InputReader::read_file(path)?;
        session.load_document(ctx, &text);
    }

    let stdin = io::stdin();
    let mut repl = Repl::new(stdin.lock(), io::stdout(), args.view);
    if !stdin.is_terminal() {
        repl = repl.without_prompt();
    }
    repl.run(ctx, session)?;
    Ok(())
}

/// Poll the input file and feed changes through the debounced session path
fn run_watch(args: &Args, ctx: &mut AppContext, session: &mut Session) -> Result<()> {
    let path = args
        .input
        .as_deref()
        .ok_or_else(|| eyre!("--watch needs an input file"))?;
    let clock = Clock::new();
    let mut last_seen: Option<SystemTime> = None;

    loop {
        if let Some(modified) = changed_since(path, last_seen) {
            last_seen = Some(modified);
            match InputReader::read_file(path) {
                Ok(text) => session.on_json_input(&text, clock.now_ms()),
                Err(e) => ctx.notification.show_error(&e.to_string()),
            }
        }

        if session.tick(ctx, clock.now_ms()) {
            if let Some(outcome) = session.outcome() {
                println!("{}", render_outcome(outcome, args.view, ctx.theme, ctx.color));
            }
        }
        print_notifications(ctx);

        thread::sleep(WATCH_POLL);
    }
}

fn changed_since(path: &Path, last_seen: Option<SystemTime>) -> Option<SystemTime> {
    let modified = InputReader::modified(path).ok()?;
    match last_seen {
        Some(seen) if seen >= modified => None,
        _ => Some(modified),
    }
}

fn print_notifications(ctx: &mut AppContext) {
    let mut stderr = io::stderr();
    let color = ctx.color && stderr.is_terminal();
    for notification in ctx.notification.drain() {
        let _ = writeln!(stderr, "{}", render_notification(&notification, ctx.theme, color));
    }
}
