use anyhow::{anyhow, Context, Result};
use cli::{CategoryAction, Cli, Commands, PreviewAction};
use config::Configuration;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use document::{ResumeDocument, SkillType};
use export::Exporter;
use notification::{ConsolePresenter, NotificationCenter};
use render::{to_html_page, Renderer};
use session::Session;
use std::path::Path;
use std::process::ExitCode;
use store::FileStore;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod config_wizard;
mod document;
mod edit;
mod export;
mod notification;
mod render;
mod session;
mod store;
mod themes;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME"))));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Config = &cli.command {
        return config_wizard::run();
    }

    let config = Configuration::load(&cli.config)?;
    let mut session = open_session(&config)?;

    match &cli.command {
        Commands::Config => unreachable!("handled above"),
        Commands::Render { out, theme } => render(&session, out.as_deref(), theme.as_deref()),
        Commands::Export {
            image,
            out,
            dry_run,
        } => export(&config, &session, image.as_deref(), out.as_deref(), *dry_run),
        Commands::Themes => {
            list_themes(&session);
            Ok(())
        }
        Commands::Theme { name } => {
            if !session.registry().contains(name) {
                println!(
                    "{} Unknown theme `{name}`, using `modern`",
                    style("!").yellow()
                );
            }
            let theme = session
                .set_theme(name)
                .with_context(|| "Failed to save theme choice")?;
            println!("Theme set to {}", style(&theme.name).cyan());
            Ok(())
        }
        Commands::Preview { action } => {
            let show = matches!(action, PreviewAction::Show);
            session
                .set_show_preview(show)
                .with_context(|| "Failed to save preview setting")?;
            println!("Preview {}", if show { "shown" } else { "hidden" });
            Ok(())
        }
        Commands::Import { path } => import(&mut session, path),
        Commands::Experience { action } => edit::experience(&mut session, action),
        Commands::Education { action } => edit::education(&mut session, action),
        Commands::Skill { action } => edit::skill(&mut session, action),
        Commands::Category { action } => category(&mut session, action),
        Commands::Reset { yes } => reset(&mut session, *yes),
        Commands::Status => {
            status(&session);
            Ok(())
        }
    }
}

fn open_session(config: &Configuration) -> Result<Session<FileStore>> {
    let registry = config
        .theme_registry()
        .with_context(|| "Failed to load themes")?;
    let store = FileStore::open(&config.store.path).with_context(|| {
        format!("Failed to open store at {}", config.store.path.display())
    })?;
    Ok(Session::load(store, registry))
}

fn render(session: &Session<FileStore>, out: Option<&Path>, theme: Option<&str>) -> Result<()> {
    if !session.show_preview() {
        println!(
            "Preview is hidden; run `{} preview show` to render it",
            env!("CARGO_PKG_NAME")
        );
        return Ok(());
    }

    let theme = match theme {
        Some(name) => session.registry().resolve(name),
        None => session.theme(),
    };
    let document = session.document();
    let root = Renderer::new(theme).render(document);
    let title = match document.personal_info.full_name.trim() {
        "" => "Resume",
        name => name,
    };
    let page = to_html_page(&root, title, theme);

    match out {
        Some(path) => {
            std::fs::write(path, page)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Rendered with {} to {}", theme.name, path.display());
        }
        None => print!("{page}"),
    }
    Ok(())
}

fn export(
    config: &Configuration,
    session: &Session<FileStore>,
    image: Option<&Path>,
    out: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let rasterizer = config.rasterizer.build(image);
    let notifications = NotificationCenter::new(ConsolePresenter::default());
    let exporter = Exporter::new(rasterizer.as_ref(), &notifications, config.export.settings());

    let outcome = exporter
        .export(session.document(), session.theme(), out, dry_run)
        .with_context(|| "Failed to export resume")?;

    let size = byte_unit::Byte::from_u64(outcome.size_bytes)
        .get_appropriate_unit(byte_unit::UnitType::Binary);
    println!();
    if outcome.written {
        println!("  PDF:    {}", outcome.path.display());
    } else {
        println!("  PDF:    {} (dry run, not written)", outcome.path.display());
    }
    let geometry = &exporter.settings().geometry;
    println!("  Theme:  {}", session.theme().name);
    println!(
        "  Pages:  {} ({} x {} mm)",
        outcome.page_count, geometry.page_width, geometry.page_height
    );
    println!("  Size:   {size:.2}");
    if outcome.images.failed + outcome.images.timed_out > 0 {
        println!(
            "  {} {} image(s) could not be loaded",
            style("!").yellow(),
            outcome.images.failed + outcome.images.timed_out
        );
    }
    Ok(())
}

fn list_themes(session: &Session<FileStore>) {
    let current = &session.theme().name;
    for name in session.registry().list_names() {
        let colors = session.registry().preview_colors(name);
        let marker = if name == current.as_str() { "*" } else { " " };
        println!(
            "{marker} {:<14} primary {}  secondary {}  background {}  accent {}",
            style(name).bold(),
            colors.primary,
            colors.secondary,
            colors.background,
            colors.accent
        );
    }
}

fn import(session: &mut Session<FileStore>, path: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: ResumeDocument = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse resume from {}", path.display()))?;
    println!(
        "Importing {} experience, {} education and {} skill entries",
        document.experience.len(),
        document.education.len(),
        document.skills.len()
    );
    let fixed = session
        .replace_document(document)
        .with_context(|| "Failed to save imported resume")?;
    if fixed > 0 {
        println!(
            "  {} {fixed} field(s) were out of range and have been adjusted",
            style("!").yellow()
        );
    }
    Ok(())
}

fn category(session: &mut Session<FileStore>, action: &CategoryAction) -> Result<()> {
    match action {
        CategoryAction::Add { kind, name } => {
            let kind: SkillType = (*kind).into();
            let added = session
                .update(|doc| doc.add_skill_category(kind, name))
                .with_context(|| "Failed to save categories")??;
            if added {
                println!("Added {kind} category `{}`", name.trim());
            } else {
                println!("{kind} category `{}` already exists", name.trim());
            }
        }
        CategoryAction::Remove { kind, name } => {
            let kind: SkillType = (*kind).into();
            if !session
                .document()
                .skill_categories
                .for_type(kind)
                .contains(name)
            {
                return Err(anyhow!("There is no {kind} category `{name}`"));
            }
            let affected = session
                .update(|doc| doc.remove_skill_category(kind, name))
                .with_context(|| "Failed to save categories")?;
            println!("Removed {kind} category `{name}`");
            if affected > 0 {
                println!("  {affected} skill(s) are now uncategorised");
            }
        }
    }
    Ok(())
}

fn reset(session: &mut Session<FileStore>, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Are you sure you want to reset all data? This cannot be undone.")
            .default(false)
            .interact()?;
    if !confirmed {
        println!("Nothing was reset.");
        return Ok(());
    }
    session
        .reset()
        .with_context(|| "Failed to reset stored resume")?;
    println!("Resume reset to the empty template.");
    Ok(())
}

fn status(session: &Session<FileStore>) {
    let document = session.document();
    let info = &document.personal_info;
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    println!("Name:        {}", or_dash(&info.full_name));
    println!("Title:       {}", or_dash(&info.job_title));
    println!("Theme:       {}", session.theme().name);
    println!(
        "Preview:     {}",
        if session.show_preview() { "shown" } else { "hidden" }
    );
    println!("Store:       {}", session.store().path().display());
    println!("Experience:  {}", document.experience.len());
    for exp in &document.experience {
        println!(
            "  {}  {} at {}",
            style(edit::short_id(&exp.id)).dim(),
            or_dash(&exp.position),
            or_dash(&exp.company)
        );
    }
    println!("Education:   {}", document.education.len());
    for edu in &document.education {
        println!(
            "  {}  {} at {}",
            style(edit::short_id(&edu.id)).dim(),
            or_dash(&edu.degree),
            or_dash(&edu.institution)
        );
    }
    println!("Skills:      {}", document.skills.len());
    for kind in SkillType::all() {
        let categories = document.skill_categories.for_type(*kind);
        println!("  {kind} categories: {}", categories.join(", "));
        for skill in document.skills.iter().filter(|s| s.kind == *kind) {
            println!(
                "  {}  {} ({}/5) {}",
                style(edit::short_id(&skill.id)).dim(),
                skill.name,
                skill.level,
                or_dash(&skill.category)
            );
        }
    }
    println!(
        "PDF name:    {}.pdf",
        export::sanitize_filename(&info.full_name)
    );
}
