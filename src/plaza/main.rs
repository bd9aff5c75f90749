use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::*;
use console::{Key, Term};
use directories::ProjectDirs;
use plaza::api::{CmdMessage, MessageLevel, PlazaApi};
use plaza::error::{PlazaError, Result};
use plaza::filter::{self, CategoryFilter, Criteria};
use plaza::modal::{Dialog, ModalCoordinator};
use plaza::model::Record;
use plaza::prefs::FileKv;
use plaza::registration::RegistrationForm;
use plaza::render::{self, format_time_ago, ViewMode};
use plaza::stats::{availability, capacity_bar, upcoming_within, RideStats};
use plaza::store::Snapshot;
use plaza::view::{ViewEvent, ViewState};
use std::path::PathBuf;

mod args;
use args::{Cli, Commands, Dataset, ViewArg};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if matches!(e, PlazaError::Load(_)) {
            eprintln!("Check the --data directory, then run the command again to retry.");
        }
        std::process::exit(1);
    }
}

struct AppContext {
    api: PlazaApi<FileKv>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.plain {
        colored::control::set_override(false);
    }
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            dataset,
            view,
            category,
            distance,
            when,
            search,
        }) => handle_list(&mut ctx, dataset, view, category, distance, when, search),
        Some(Commands::Show { dataset, id }) => handle_show(&mut ctx, dataset, &id),
        Some(Commands::Browse { dataset }) => handle_browse(&mut ctx, dataset),
        Some(Commands::Stats) => handle_stats(&mut ctx),
        Some(Commands::Join {
            ride_id,
            name,
            email,
            agree,
        }) => handle_join(&mut ctx, &ride_id, name, email, agree),
        Some(Commands::Registrations { cancel }) => handle_registrations(&mut ctx, cancel),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Export { out }) => handle_export(&ctx, &out),
        None => handle_list(
            &mut ctx,
            Dataset::Rides,
            ViewArg::Grid,
            None,
            None,
            None,
            None,
        ),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let prefs_dir = match std::env::var_os("PLAZA_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "plaza", "plaza")
            .expect("Could not determine preference dir")
            .data_dir()
            .to_path_buf(),
    };

    let api = PlazaApi::new(cli.data.clone(), FileKv::new(&prefs_dir));
    Ok(AppContext { api })
}

fn view_mode(view: ViewArg) -> ViewMode {
    match view {
        ViewArg::Grid => ViewMode::Grid,
        ViewArg::List => ViewMode::List,
    }
}

fn build_criteria(
    category: Option<String>,
    distance: Option<String>,
    when: Option<String>,
    search: Option<String>,
) -> Result<Criteria> {
    let mut criteria = Criteria::none();
    if let Some(c) = category {
        criteria.category = CategoryFilter::parse(&c);
    }
    if let Some(d) = distance {
        criteria.range = d.parse().map_err(PlazaError::Api)?;
    }
    if let Some(w) = when {
        criteria.window = w.parse().map_err(PlazaError::Api)?;
    }
    criteria.search = search;
    Ok(criteria)
}

fn handle_list(
    ctx: &mut AppContext,
    dataset: Dataset,
    view: ViewArg,
    category: Option<String>,
    distance: Option<String>,
    when: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let criteria = build_criteria(category, distance, when, search)?;
    if let Some(term) = criteria.search.as_deref() {
        ctx.api.note_search(term);
    }
    if let Some(greeting) = ctx.api.record_visit() {
        println!("{}\n", greeting.dimmed());
    }

    let mode = view_mode(view);
    let today = Local::now().date_naive();

    match dataset {
        Dataset::Members => {
            let (snapshot, messages) = ctx.api.load_members()?;
            print!("{}", render_listing(snapshot, &criteria, mode, today));
            print_messages(&messages);
        }
        Dataset::Attractions => {
            let (snapshot, messages) = ctx.api.load_attractions()?;
            print!("{}", render_listing(snapshot, &criteria, mode, today));
            print_messages(&messages);
        }
        Dataset::Rides => {
            let (snapshot, messages) = ctx.api.load_rides()?;
            print!("{}", render_listing(snapshot, &criteria, mode, today));
            print_messages(&messages);
        }
    }
    Ok(())
}

fn render_listing<R: Record>(
    snapshot: &Snapshot<R>,
    criteria: &Criteria,
    mode: ViewMode,
    today: NaiveDate,
) -> String {
    let visible = filter::apply(snapshot, criteria, today);
    render::render(&visible, mode)
}

fn handle_show(ctx: &mut AppContext, dataset: Dataset, id: &str) -> Result<()> {
    match dataset {
        Dataset::Members => {
            let (snapshot, messages) = ctx.api.load_members()?;
            print!("{}", render_record(snapshot, id)?);
            print_messages(&messages);
        }
        Dataset::Attractions => {
            let (snapshot, messages) = ctx.api.load_attractions()?;
            print!("{}", render_record(snapshot, id)?);
            print_messages(&messages);
        }
        Dataset::Rides => {
            let (snapshot, messages) = ctx.api.load_rides()?;
            print!("{}", render_record(snapshot, id)?);
            print_messages(&messages);
        }
    }
    Ok(())
}

fn render_record<R: Record>(snapshot: &Snapshot<R>, id: &str) -> Result<String> {
    snapshot
        .get(id)
        .map(render::render_detail)
        .ok_or_else(|| PlazaError::RecordNotFound(id.to_string()))
}

fn handle_stats(ctx: &mut AppContext) -> Result<()> {
    let (snapshot, messages) = ctx.api.load_rides()?;
    let stats = RideStats::collect(snapshot.records());

    println!("{}", "Ride statistics".bold());
    println!("--------------------------------");
    println!("Rides: {}", snapshot.len());
    let difficulty: Vec<String> = stats
        .by_difficulty
        .iter()
        .map(|(name, count)| format!("{} {}", name, count))
        .collect();
    println!("By difficulty: {}", difficulty.join(" · "));
    println!(
        "Distance: {:.0} miles total, {:.1} average",
        stats.total_distance, stats.average_distance
    );
    println!(
        "Participation: {} of {} spots filled ({:.1} riders per ride)",
        stats.total_participants, stats.total_capacity, stats.average_participation
    );
    let features: Vec<String> = stats
        .popular_features
        .iter()
        .map(|(name, count)| format!("{} ({})", name, count))
        .collect();
    if !features.is_empty() {
        println!("Features: {}", features.join(", "));
    }
    let today = Local::now().date_naive();
    println!(
        "Upcoming in the next 30 days: {}",
        upcoming_within(snapshot, 30, today).len()
    );

    println!("\n{}", "Availability".bold());
    for (ride, info) in snapshot
        .records()
        .iter()
        .zip(availability(snapshot.records()))
    {
        println!(
            "  {} {:<40} {} open  {}",
            capacity_bar(ride.current_participants, ride.max_participants, 10),
            ride.title,
            info.available,
            info.status.label().dimmed()
        );
    }

    print_messages(&messages);
    Ok(())
}

fn handle_join(
    ctx: &mut AppContext,
    ride_id: &str,
    name: String,
    email: String,
    agree: bool,
) -> Result<()> {
    let form = RegistrationForm {
        name,
        email,
        safety_agreement: agree,
    };
    let (registration, messages) = ctx.api.join_ride(ride_id, &form)?;
    println!(
        "Registration {} confirmed for {} on {}.",
        registration.id,
        registration.ride_title,
        registration.ride_date.format("%B %-d, %Y")
    );
    print_messages(&messages);
    Ok(())
}

fn handle_registrations(ctx: &mut AppContext, cancel: Option<String>) -> Result<()> {
    if let Some(id) = cancel {
        let (_, messages) = ctx.api.cancel_registration(&id)?;
        print_messages(&messages);
        return Ok(());
    }

    let registrations = ctx.api.registrations();
    if registrations.is_empty() {
        println!("No registrations yet.");
        return Ok(());
    }

    for reg in &registrations {
        let status = match reg.status {
            plaza::registration::RegistrationStatus::Confirmed => "confirmed".green(),
            plaza::registration::RegistrationStatus::Cancelled => "cancelled".red(),
        };
        println!(
            "{}  {}  {} on {}  {}",
            reg.id,
            status,
            reg.ride_title,
            reg.ride_date.format("%Y-%m-%d"),
            format_time_ago(reg.created_at).dimmed()
        );
    }
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for (name, current) in ctx.api.config_entries() {
                println!("{} = {}", name, current);
            }
        }
        (Some(key), None) => {
            let entries = ctx.api.config_entries();
            match entries.iter().find(|(name, _)| *name == key) {
                Some((name, current)) => println!("{} = {}", name, current),
                None => println!("Unknown config key: {}", key),
            }
        }
        (Some(key), Some(value)) => {
            let (_, messages) = ctx.api.set_config(&key, &value)?;
            print_messages(&messages);
        }
    }
    Ok(())
}

fn handle_export(ctx: &AppContext, out: &std::path::Path) -> Result<()> {
    let (_, messages) = ctx.api.export_backup(out)?;
    print_messages(&messages);
    Ok(())
}

fn handle_browse(ctx: &mut AppContext, dataset: Dataset) -> Result<()> {
    let today = Local::now().date_naive();
    match dataset {
        Dataset::Members => {
            let (snapshot, messages) = ctx.api.load_members()?;
            let snapshot = snapshot.clone();
            print_messages(&messages);
            browse_session(&snapshot, today)
        }
        Dataset::Attractions => {
            let (snapshot, messages) = ctx.api.load_attractions()?;
            let snapshot = snapshot.clone();
            print_messages(&messages);
            browse_session(&snapshot, today)
        }
        Dataset::Rides => {
            let (snapshot, messages) = ctx.api.load_rides()?;
            let snapshot = snapshot.clone();
            print_messages(&messages);
            browse_session(&snapshot, today)
        }
    }
}

/// Interactive session: the terminal rendition of the page affordances.
/// The view state machine owns mode and criteria; the modal stack owns the
/// detail overlay, with Escape closing top-down.
fn browse_session<R: Record>(snapshot: &Snapshot<R>, today: NaiveDate) -> Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        return Err(PlazaError::Api(
            "browse needs an interactive terminal; use `list` instead".to_string(),
        ));
    }

    let mut view = ViewState::new();
    view.handle(ViewEvent::LoadStarted);
    view.handle(ViewEvent::LoadFinished);
    let mut modals = ModalCoordinator::new();
    let mut selected: usize = 0;

    loop {
        let visible = filter::apply(snapshot, view.criteria(), today);
        selected = selected.min(visible.len().saturating_sub(1));

        term.clear_screen().map_err(PlazaError::Io)?;
        if let Some(dialog) = modals.active() {
            term.write_line(&dialog.body).map_err(PlazaError::Io)?;
            term.write_line(&"Esc to close".dimmed().to_string())
                .map_err(PlazaError::Io)?;
        } else {
            let header = format!(
                "{} of {} records · mode: {} · {}",
                visible.len(),
                snapshot.len(),
                view.mode(),
                view.criteria().describe()
            );
            term.write_line(&header.bold().to_string())
                .map_err(PlazaError::Io)?;
            term.write_line("").map_err(PlazaError::Io)?;
            term.write_str(&render::render(&visible, view.mode()))
                .map_err(PlazaError::Io)?;
            term.write_line("").map_err(PlazaError::Io)?;
            if let Some(record) = visible.get(selected) {
                term.write_line(&format!(
                    "▸ {}/{}: {}",
                    selected + 1,
                    visible.len(),
                    record.title()
                ))
                .map_err(PlazaError::Io)?;
            }
            term.write_line(
                &"j/k move · Enter details · g grid · l list · / search · q quit"
                    .dimmed()
                    .to_string(),
            )
            .map_err(PlazaError::Io)?;
        }

        match term.read_key().map_err(PlazaError::Io)? {
            Key::Escape => {
                modals.close_active();
            }
            Key::Char('q') => {
                if modals.active().is_none() {
                    break;
                }
            }
            Key::Char('g') => {
                view.handle(ViewEvent::SetMode(ViewMode::Grid));
            }
            Key::Char('l') => {
                view.handle(ViewEvent::SetMode(ViewMode::List));
            }
            Key::Char('j') | Key::ArrowDown => {
                if modals.active().is_none() {
                    selected = selected.saturating_add(1);
                }
            }
            Key::Char('k') | Key::ArrowUp => {
                if modals.active().is_none() {
                    selected = selected.saturating_sub(1);
                }
            }
            Key::Char('/') => {
                if modals.active().is_none() {
                    term.write_str("search: ").map_err(PlazaError::Io)?;
                    let input = term.read_line().map_err(PlazaError::Io)?;
                    let input = input.trim().to_string();
                    let term_opt = if input.is_empty() { None } else { Some(input) };
                    view.handle(ViewEvent::SetSearch(term_opt));
                    selected = 0;
                }
            }
            Key::Enter => {
                if modals.active().is_none() {
                    if let Some(record) = visible.get(selected) {
                        let body = render::render_detail(*record);
                        modals.open(
                            Dialog::new(record.id(), record.title(), body),
                            Some(format!("result-{}", selected + 1)),
                        );
                    }
                }
            }
            _ => {}
        }
    }

    term.clear_screen().map_err(PlazaError::Io)?;
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
