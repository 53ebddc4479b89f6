//! Command handlers.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use shade::{
    AmbientSignal, FileStore, NoSignal, RootElement, RouteTable, ShadeConfig, SystemSignal,
    ThemeController,
};

use crate::cli::{GlobalArgs, RoutesCommand, ThemeCommand};
use crate::output::{render_change, render_route, render_routes, render_theme, ThemeReport};

fn load_config(global: &GlobalArgs) -> Result<ShadeConfig> {
    match &global.config {
        Some(path) => ShadeConfig::from_file(path).context("loading configuration"),
        None => Ok(ShadeConfig::default()),
    }
}

fn open_store(global: &GlobalArgs) -> Result<FileStore> {
    let store = match &global.store {
        Some(path) => FileStore::open(path.clone()),
        None => FileStore::open_default(),
    };
    store.context("opening preference store")
}

struct Session {
    theme: ThemeController,
    root: RootElement,
    store_path: PathBuf,
}

impl Session {
    fn mount(global: &GlobalArgs, signal: &dyn AmbientSignal) -> Result<Self> {
        let config = load_config(global)?;
        let store = open_store(global)?;
        let store_path = store.path().to_path_buf();
        let root = RootElement::new();
        let theme = ThemeController::mount(store, signal, root.clone(), config);
        Ok(Self {
            theme,
            root,
            store_path,
        })
    }

    fn report(&self) -> ThemeReport {
        ThemeReport {
            preference: self.theme.preference(),
            source: ThemeReport::source_label(self.theme.source()),
            tracking: ThemeReport::is_tracking(self.theme.tracking_state()),
            classes: self.root.classes(),
            color_scheme: self.root.color_scheme(),
            store: self.store_path.clone(),
        }
    }
}

pub fn run_theme(command: ThemeCommand, global: &GlobalArgs, out: &mut dyn Write) -> Result<()> {
    let system = (!global.no_system_signal).then(SystemSignal::new);
    let signal: &dyn AmbientSignal = match &system {
        Some(system) => system,
        None => &NoSignal,
    };

    let mut session = Session::mount(global, signal)?;
    match command {
        ThemeCommand::Show => {}
        ThemeCommand::Toggle => {
            session.theme.toggle();
        }
        ThemeCommand::Set { preference } => session.theme.set(preference),
        ThemeCommand::Clear => {
            session.theme.clear();
        }
        ThemeCommand::Watch { interval_ms, ticks } => {
            let Some(system) = &system else {
                bail!("watching requires the system color scheme; drop --no-system-signal");
            };
            write!(out, "{}", render_theme(&session.report(), global.output))?;
            return watch(&session, system, global, Duration::from_millis(interval_ms), ticks, out);
        }
    }

    write!(out, "{}", render_theme(&session.report(), global.output))?;
    Ok(())
}

fn watch(
    session: &Session,
    system: &SystemSignal,
    global: &GlobalArgs,
    interval: Duration,
    ticks: u64,
    out: &mut dyn Write,
) -> Result<()> {
    let mut polls = 0;
    while ticks == 0 || polls < ticks {
        std::thread::sleep(interval);
        polls += 1;

        let before = session.theme.preference();
        if let Some(changed) = system.poll() {
            tracing::debug!(%changed, "system color scheme poll reported a change");
        }
        let after = session.theme.preference();
        if after != before {
            write!(out, "{}", render_change(after, global.output))?;
            out.flush()?;
        }
    }
    Ok(())
}

pub fn run_routes(command: RoutesCommand, global: &GlobalArgs, out: &mut dyn Write) -> Result<()> {
    let table = RouteTable::standard();
    match command {
        RoutesCommand::List => write!(out, "{}", render_routes(table.routes(), global.output))?,
        RoutesCommand::Resolve { path } => {
            let route = table
                .resolve(&path)
                .with_context(|| format!("no route matches '{}'", path))?;
            write!(out, "{}", render_route(route, global.output))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputMode;
    use shade::ThemePreference;

    fn global(dir: &tempfile::TempDir) -> GlobalArgs {
        GlobalArgs {
            store: Some(dir.path().join("prefs.json")),
            config: None,
            output: OutputMode::Text,
            no_system_signal: true,
            verbose: false,
        }
    }

    fn run(command: ThemeCommand, global: &GlobalArgs) -> String {
        let mut out = Vec::new();
        run_theme(command, global, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_show_without_signal_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let out = run(ThemeCommand::Show, &global(&dir));
        assert!(out.starts_with("theme: light (fallback, fixed)"));
    }

    #[test]
    fn test_toggle_persists_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let args = global(&dir);

        let out = run(ThemeCommand::Toggle, &args);
        assert!(out.starts_with("theme: dark (stored, fixed)"));

        let out = run(ThemeCommand::Show, &args);
        assert!(out.starts_with("theme: dark (stored, fixed)"));
    }

    #[test]
    fn test_set_and_clear_with_deferred_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("shade.json");
        std::fs::write(&config, r#"{"persist_on_startup": false}"#).unwrap();
        let mut args = global(&dir);
        args.config = Some(config);

        let out = run(
            ThemeCommand::Set {
                preference: ThemePreference::Dark,
            },
            &args,
        );
        assert!(out.starts_with("theme: dark (stored, fixed)"));

        let out = run(ThemeCommand::Clear, &args);
        assert!(out.starts_with("theme: light (fallback, following system)"));
        let raw = std::fs::read_to_string(dir.path().join("prefs.json")).unwrap();
        assert!(!raw.contains("theme"));
    }

    #[test]
    fn test_watch_requires_system_signal() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let result = run_theme(
            ThemeCommand::Watch {
                interval_ms: 1,
                ticks: 1,
            },
            &global(&dir),
            &mut out,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("shade.json");
        std::fs::write(&config, "not json").unwrap();
        let mut args = global(&dir);
        args.config = Some(config);

        let mut out = Vec::new();
        let err = run_theme(ThemeCommand::Show, &args, &mut out).unwrap_err();
        assert!(format!("{:#}", err).contains("loading configuration"));
    }

    #[test]
    fn test_routes_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        run_routes(
            RoutesCommand::Resolve {
                path: "/people/?tab=all".to_string(),
            },
            &global(&dir),
            &mut out,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "/people  People -> people\n");
    }

    #[test]
    fn test_routes_resolve_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = run_routes(
            RoutesCommand::Resolve {
                path: "/admin".to_string(),
            },
            &global(&dir),
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("/admin"));
    }
}
