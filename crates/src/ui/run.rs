use crate::catalog::query::retry_delay;
use crate::catalog::{Effect, ProductAccessor};
use crate::config::Settings;
use crate::ui::Msg;
use crate::ui::model::{Model, initial_model};
use crate::ui::render::render_full;
use bubbletea_rs::{
    Program, command::Cmd, event::KeyMsg, event::WindowSizeMsg, model::Model as TeaModel,
    window_size,
};
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, error, info};

// `TeaModel::init` takes no arguments, so the program's inputs are parked
// here by `run` before the program starts.
static SETTINGS: OnceCell<Settings> = OnceCell::new();
static ACCESSOR: OnceCell<Arc<dyn ProductAccessor>> = OnceCell::new();

/// Completion of an accessor call, fed back into the event loop.
#[derive(Debug)]
pub struct AccessorDone(pub Msg);

/// What a key press means to the shell.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Send(Msg),
    Ignore,
}

pub fn map_key(m: &Model, key: &KeyCode, modifiers: KeyModifiers) -> KeyAction {
    match key {
        KeyCode::Esc => {
            if m.help_open || m.menu_open || m.query.notice().is_some() {
                KeyAction::Send(Msg::KeyEsc)
            } else {
                KeyAction::Quit
            }
        }
        KeyCode::Enter => KeyAction::Send(Msg::KeyEnter),
        KeyCode::Backspace => KeyAction::Send(Msg::KeyBackspace),
        KeyCode::Tab => KeyAction::Send(Msg::KeyTab),
        KeyCode::BackTab => KeyAction::Send(Msg::KeyBackTab),
        KeyCode::Up => KeyAction::Send(Msg::KeyUp),
        KeyCode::Down => KeyAction::Send(Msg::KeyDown),
        KeyCode::Left => KeyAction::Send(Msg::KeyLeft),
        KeyCode::Right => KeyAction::Send(Msg::KeyRight),
        KeyCode::Char(ch) => {
            // Ctrl-C can arrive as ETX
            if *ch == '\u{03}' {
                return KeyAction::Quit;
            }
            if modifiers.contains(KeyModifiers::CONTROL) {
                return match ch {
                    'c' | 'C' => KeyAction::Quit,
                    'n' | 'N' => KeyAction::Send(Msg::KeyDown),
                    'p' | 'P' => KeyAction::Send(Msg::KeyUp),
                    _ => KeyAction::Ignore,
                };
            }
            match ch {
                ' ' => KeyAction::Send(Msg::KeySpace),
                'q' => KeyAction::Quit,
                c => KeyAction::Send(Msg::Rune(*c)),
            }
        }
        _ => KeyAction::Ignore,
    }
}

/// Turn one effect into a command that calls the accessor.
pub fn effect_cmd(accessor: Arc<dyn ProductAccessor>, effect: Effect) -> Cmd {
    match effect {
        Effect::Fetch { attempt } => Box::pin(async move {
            let delay = retry_delay(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            debug!(attempt, "fetching product list");
            let result = accessor.fetch_list().await;
            let done = AccessorDone(Msg::Fetched { attempt, result });
            Some(Box::new(done) as bubbletea_rs::event::Msg)
        }),
        Effect::Delete(id) => Box::pin(async move {
            let result = accessor.delete(id).await;
            let done = AccessorDone(Msg::Deleted { id, result });
            Some(Box::new(done) as bubbletea_rs::event::Msg)
        }),
    }
}

pub fn effects_cmd(accessor: &Arc<dyn ProductAccessor>, effects: Vec<Effect>) -> Option<Cmd> {
    let mut cmds: Vec<Cmd> = effects
        .into_iter()
        .map(|e| effect_cmd(Arc::clone(accessor), e))
        .collect();
    match cmds.len() {
        0 => None,
        1 => cmds.pop(),
        _ => Some(bubbletea_rs::batch(cmds)),
    }
}

struct TeaAdapter {
    inner: Model,
    accessor: Option<Arc<dyn ProductAccessor>>,
}

impl TeaAdapter {
    fn dispatch(&mut self, msg: Msg) -> Option<Cmd> {
        let effects = self.inner.update(msg);
        match &self.accessor {
            Some(accessor) => effects_cmd(accessor, effects),
            None => None,
        }
    }
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        let settings = SETTINGS.get().cloned().unwrap_or_default();
        let mut adapter = TeaAdapter {
            inner: initial_model(settings),
            accessor: ACCESSOR.get().cloned(),
        };
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        adapter.inner.update(Msg::WindowSize {
            width: width as usize,
            height: height as usize,
        });
        let effects = adapter.inner.start();
        let mut cmds = vec![window_size()];
        if let Some(accessor) = &adapter.accessor {
            cmds.extend(effects_cmd(accessor, effects));
        }
        (adapter, Some(bubbletea_rs::batch(cmds)))
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            return match map_key(&self.inner, &km.key, km.modifiers) {
                KeyAction::Quit => Some(bubbletea_rs::quit()),
                KeyAction::Send(m) => self.dispatch(m),
                KeyAction::Ignore => None,
            };
        }
        if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            return self.dispatch(Msg::WindowSize {
                width: ws.width as usize,
                height: ws.height as usize,
            });
        }
        if let Some(done) = msg.downcast_ref::<AccessorDone>() {
            return self.dispatch(done.0.clone());
        }
        None
    }

    fn view(&self) -> String {
        render_full(&self.inner)
    }
}

/// Run the interactive program until the user quits.
pub async fn run(settings: Settings, accessor: Arc<dyn ProductAccessor>) -> Result<(), String> {
    if SETTINGS.set(settings).is_err() || ACCESSOR.set(accessor).is_err() {
        return Err("the program can only be started once per process".into());
    }
    info!("starting terminal ui");
    let builder = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true);
    let program = match builder.build() {
        Ok(p) => p,
        Err(e) => return Err(format!("failed to build program: {e:?}")),
    };
    match program.run().await {
        Ok(_) => {
            info!("terminal ui closed");
            Ok(())
        }
        Err(e) => {
            error!(error = ?e, "program error");
            Err(format!("program error: {e:?}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryAccessor;
    use futures::executor::block_on;

    fn model_at(path: &str) -> Model {
        initial_model(Settings {
            start_route: path.into(),
            ..Settings::default()
        })
    }

    #[test]
    fn esc_quits_only_when_nothing_is_open() {
        let mut m = model_at("/");
        assert_eq!(map_key(&m, &KeyCode::Esc, KeyModifiers::NONE), KeyAction::Quit);
        m.help_open = true;
        assert_eq!(
            map_key(&m, &KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::Send(Msg::KeyEsc)
        );
    }

    #[test]
    fn keys_map_to_messages() {
        let m = model_at("/");
        assert_eq!(
            map_key(&m, &KeyCode::Char(' '), KeyModifiers::NONE),
            KeyAction::Send(Msg::KeySpace)
        );
        assert_eq!(
            map_key(&m, &KeyCode::BackTab, KeyModifiers::SHIFT),
            KeyAction::Send(Msg::KeyBackTab)
        );
        assert_eq!(
            map_key(&m, &KeyCode::Char('t'), KeyModifiers::NONE),
            KeyAction::Send(Msg::Rune('t'))
        );
        assert_eq!(
            map_key(&m, &KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit
        );
        assert_eq!(map_key(&m, &KeyCode::Char('q'), KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(map_key(&m, &KeyCode::F(1), KeyModifiers::NONE), KeyAction::Ignore);
    }

    #[test]
    fn no_effects_means_no_command() {
        let accessor: Arc<dyn ProductAccessor> = Arc::new(MemoryAccessor::seeded());
        assert!(effects_cmd(&accessor, Vec::new()).is_none());
    }

    #[test]
    fn fetch_effect_reports_back_with_collection() {
        let accessor: Arc<dyn ProductAccessor> = Arc::new(MemoryAccessor::seeded());
        let out = block_on(effect_cmd(accessor, Effect::Fetch { attempt: 0 }));
        let msg = out.expect("fetch produces a message");
        let done = msg.downcast_ref::<AccessorDone>().expect("accessor message");
        match &done.0 {
            Msg::Fetched { attempt, result } => {
                assert_eq!(*attempt, 0);
                assert_eq!(result.as_ref().map(|c| c.content.len()), Ok(12));
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn delete_effect_calls_accessor_once() {
        let memory = MemoryAccessor::seeded();
        let accessor: Arc<dyn ProductAccessor> = Arc::new(memory.clone());
        let out = block_on(effect_cmd(Arc::clone(&accessor), Effect::Delete(3)));
        let msg = out.expect("delete produces a message");
        let done = msg.downcast_ref::<AccessorDone>().expect("accessor message");
        assert_eq!(done.0, Msg::Deleted { id: 3, result: Ok(()) });
        let after = block_on(accessor.fetch_list()).expect("fetch");
        assert_eq!(after.content.len(), 11);
        // a second delete of the same id finds nothing
        let again = block_on(memory.delete(3));
        assert!(again.is_err());
    }
}
