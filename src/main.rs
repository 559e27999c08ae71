mod app;
mod cli;
mod config;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::{Result, SmartAgroError};
use logic::{ExportedSettings, FieldSnapshot, ReadingSimulator, RulesEngine};
use models::{ThresholdConfig, TEMPERATURE_ALERT_MESSAGE};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tracing_subscriber::EnvFilter;
use ui::screens::{DashboardScreen, HistoryScreen, SettingsScreen};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .init();

    if let Some(Commands::Init) = cli.command {
        let (_, path) = Config::setup_interactive()?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let mut config = Config::load_or_default(cli.config.clone())?;
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }
    let thresholds = config.validate()?;
    let selected_plot = select_plot(&config, cli.plot.as_deref())?;

    match cli.command {
        Some(Commands::Init) => Ok(()),
        Some(Commands::Check) => run_check(&config, &thresholds),
        Some(Commands::Evaluate { json }) => {
            run_evaluate(&config, &thresholds, selected_plot, json)
        }
        Some(Commands::Export { ref output }) => {
            let path = match output {
                Some(p) => p.clone(),
                None => config.export_path(cli.data_dir.as_ref())?,
            };
            let plot = &config.farm.plots[selected_plot];
            ExportedSettings::new(plot.as_str(), thresholds).write_to(&path)?;
            println!("Exported configuration for {} to {}", plot, path.display());
            Ok(())
        }
        None => {
            let export_path = config.export_path(cli.data_dir.as_ref())?;
            let simulator = ReadingSimulator::from_config(&config.simulation)?;
            let app = App::new(config, thresholds, simulator, selected_plot, export_path);
            run_tui(app)
        }
    }
}

fn select_plot(config: &Config, requested: Option<&str>) -> Result<usize> {
    match requested {
        None => Ok(0),
        Some(name) => config.plot_index(name).ok_or_else(|| {
            SmartAgroError::invalid(
                "plot",
                format!(
                    "'{}' is not a configured plot ({})",
                    name,
                    config.farm.plots.join(", ")
                ),
            )
        }),
    }
}

fn run_check(config: &Config, thresholds: &ThresholdConfig) -> Result<()> {
    println!("Configuration OK");
    println!();
    println!("Farm:     {}", config.farm.name);
    println!("Plots:    {}", config.farm.plots.join(", "));
    println!();
    println!("Thresholds");
    println!("  Minimum battery for irrigation: {}%", thresholds.min_battery_for_irrigation);
    println!("  Moisture threshold:             {}%", thresholds.moisture_threshold);
    println!("  Maximum tolerated temperature:  {}°C", thresholds.max_tolerable_temp);
    println!("  Drought tolerance:              {}", thresholds.drought_tolerance);
    println!();
    println!("Simulation");
    match config.simulation.seed {
        Some(seed) => println!("  Seed:          {}", seed),
        None => println!("  Seed:          (random)"),
    }
    println!("  History hours: {}", config.simulation.history_hours);
    println!();
    println!("Rules");
    for (id, name) in RulesEngine::new().list_rules() {
        println!("  {:<14} {}", id, name);
    }
    Ok(())
}

fn run_evaluate(
    config: &Config,
    thresholds: &ThresholdConfig,
    selected_plot: usize,
    json: bool,
) -> Result<()> {
    let mut simulator = ReadingSimulator::from_config(&config.simulation)?;
    let plot = &config.farm.plots[selected_plot];
    let snapshot = FieldSnapshot::capture(
        &mut simulator,
        plot,
        thresholds,
        chrono::Local::now(),
        config.simulation.history_hours,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let r = &snapshot.reading;
    println!("{} ({})", snapshot.plot, snapshot.captured_at.format("%Y-%m-%d %H:%M"));
    println!("  Soil moisture: {}%", r.soil_moisture_percent);
    println!("  Temperature:   {}°C", r.ambient_temp_c);
    println!("  Battery:       {}%", r.battery_percent);
    println!("  Rain forecast: {}", r.rain_forecast);
    println!();
    println!(
        "{} {}",
        snapshot.decision.headline(),
        snapshot.decision.reason
    );
    if snapshot.temperature_alert {
        println!("{}", TEMPERATURE_ALERT_MESSAGE);
    }
    Ok(())
}

fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let screen = DashboardScreen::new(
                        &app.config.farm.name,
                        &app.snapshot,
                        &app.thresholds,
                        &app.recommendations,
                    )
                    .with_plot_position(app.selected_plot, app.plot_count())
                    .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::History => {
                    let screen =
                        HistoryScreen::new(app.plot_name(), &app.snapshot.history, &app.thresholds);
                    f.render_widget(screen, area);
                }
                Screen::Settings => {
                    let screen = SettingsScreen::new(app.plot_name(), &app.thresholds)
                        .with_focus(app.settings_state.focused_field);
                    f.render_widget(screen, area);
                }
            }
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.quit();
                }
                KeyCode::Char('q') => app.quit(),
                KeyCode::Esc => {
                    // Go back to dashboard
                    app.switch_screen(Screen::Dashboard);
                    app.clear_status();
                }
                KeyCode::Char(c) => {
                    if let Some(screen) = Screen::from_key(c) {
                        app.switch_screen(screen);
                    } else {
                        handle_global_key(app, c);
                    }
                }
                code => {
                    if app.screen == Screen::Settings {
                        handle_settings_input(app, code);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_global_key(app: &mut App, c: char) {
    match c {
        'r' => app.refresh(),
        'p' => app.next_plot(),
        'P' => app.prev_plot(),
        'm' => app.manual_irrigation(),
        'e' => app.export(),
        'i' => app.import(),
        _ => {}
    }
}

fn handle_settings_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::BackTab => app.settings_state.prev_field(),
        KeyCode::Down | KeyCode::Tab => app.settings_state.next_field(),
        KeyCode::Left => app.adjust_setting(-1),
        KeyCode::Right => app.adjust_setting(1),
        KeyCode::PageDown => app.adjust_setting(-10),
        KeyCode::PageUp => app.adjust_setting(10),
        _ => {}
    }
}
