use crate::app::action::Action;
use crate::app::event::{AppEvent, Overlay};
use crate::app::state::*;
use crate::bus::EventBus;
use crate::commands::{parse_prompt, ClickEvent, CommandRegistry};
use crate::menu::{ClickContext, ItemKind};
use crate::notebook::Document;
use crate::tree::{PathList, RowDecorator};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Control name reported to commands typed at the prompt.
const PROMPT_CONTROL: &str = "command-prompt";

/// What the handler may consult while turning an event into actions.
pub struct HandlerContext<'a> {
    pub registry: &'a dyn CommandRegistry,
    pub document: &'a dyn Document,
    pub bus: &'a EventBus<AppState>,
}

impl HandlerContext<'_> {
    fn click_context(&self) -> ClickContext<'_> {
        ClickContext {
            registry: self.registry,
            document: self.document,
        }
    }
}

pub fn handle_event(state: &mut AppState, event: AppEvent, ctx: &HandlerContext<'_>) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent, ctx)
        }
        AppEvent::Bus(event) => {
            if let Err(e) = ctx.bus.publish(state, &event) {
                state.fail(e.to_string());
            }
            state.clamp_cursor();
            state.dirty = true;
            vec![]
        }
        AppEvent::Deferred(action) => vec![action],
        AppEvent::Status(text) => {
            state.notify(text);
            vec![]
        }
        AppEvent::Failure(text) => {
            state.fail(text);
            vec![]
        }
        AppEvent::ShowOverlay(overlay) => {
            state.overlay = Some(overlay);
            state.dirty = true;
            vec![]
        }
        AppEvent::CloseRequested => vec![Action::Quit],
        AppEvent::Tick => {
            state.tick();
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent, ctx: &HandlerContext<'_>) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key, ctx),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent, ctx: &HandlerContext<'_>) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    if let Some(Overlay::ConfirmRestore { checkpoint_id, .. }) = &state.overlay {
        let checkpoint_id = checkpoint_id.clone();
        return handle_confirm_key(state, key, checkpoint_id);
    }

    // Overlays swallow input until dismissed
    if state.overlay.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            state.overlay = None;
        }
        return vec![];
    }

    if state.focus == FocusPanel::Prompt {
        return handle_prompt_key(state, key, ctx);
    }

    match key.code {
        KeyCode::Tab => {
            state.cycle_focus();
            return vec![];
        }
        KeyCode::Char(':') => {
            state.start_prompt(PromptMode::Command);
            return vec![];
        }
        KeyCode::Char('q') => return vec![Action::Quit],
        _ => {}
    }

    match state.focus {
        FocusPanel::Menu => handle_menu_key(state, key, ctx),
        FocusPanel::Running | FocusPanel::Files => handle_list_key(state, key),
        FocusPanel::Prompt => vec![],
    }
}

/// Only an explicit yes restores the checkpoint.
fn handle_confirm_key(state: &mut AppState, key: KeyEvent, checkpoint_id: String) -> Vec<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            state.overlay = None;
            vec![Action::RevertToCheckpoint { checkpoint_id }]
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
            state.overlay = None;
            state.notify("Revert cancelled");
            vec![]
        }
        _ => vec![],
    }
}

fn handle_menu_key(state: &mut AppState, key: KeyEvent, ctx: &HandlerContext<'_>) -> Vec<Action> {
    if !state.cursor.open {
        match key.code {
            KeyCode::Left => state.switch_menu(false),
            KeyCode::Right => state.switch_menu(true),
            KeyCode::Enter | KeyCode::Down | KeyCode::F(10) => state.open_menu(),
            _ => {}
        }
        return vec![];
    }

    match key.code {
        KeyCode::Esc => {
            if !state.leave_submenu() {
                state.close_menu();
            }
            vec![]
        }
        KeyCode::Up => {
            state.move_item(false);
            vec![]
        }
        KeyCode::Down => {
            state.move_item(true);
            vec![]
        }
        KeyCode::Left => {
            if !state.leave_submenu() {
                state.switch_menu(false);
            }
            vec![]
        }
        KeyCode::Right => {
            if !state.enter_submenu() {
                state.switch_menu(true);
            }
            vec![]
        }
        KeyCode::Enter => activate_menu_item(state, ctx),
        _ => vec![],
    }
}

fn activate_menu_item(state: &mut AppState, ctx: &HandlerContext<'_>) -> Vec<Action> {
    let Some(path) = state.selected_path() else {
        return vec![];
    };
    if state.selected_item().map(|i| i.kind) == Some(ItemKind::Submenu) {
        state.enter_submenu();
        return vec![];
    }
    match state.menubar.click_at(&path, &ctx.click_context()) {
        Ok(actions) => {
            // A click that did nothing leaves the dropdown open.
            if !actions.is_empty() {
                state.close_menu();
            }
            actions
        }
        Err(e) => {
            state.fail(e.to_string());
            vec![]
        }
    }
}

fn handle_list_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.code == KeyCode::Char('/') {
        state.start_prompt(PromptMode::Filter);
        return vec![];
    }
    match state.focus {
        FocusPanel::Files => navigate_list(state.files.list_mut(), key),
        _ => navigate_list(state.kernels.list_mut(), key),
    }
}

fn navigate_list<D: RowDecorator>(list: &mut PathList<D>, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up => list.move_up(),
        KeyCode::Down => list.move_down(),
        KeyCode::Enter => return list.activate_selected().into_iter().collect(),
        KeyCode::Esc => list.set_filter(""),
        _ => {}
    }
    vec![]
}

fn handle_prompt_key(state: &mut AppState, key: KeyEvent, ctx: &HandlerContext<'_>) -> Vec<Action> {
    match key.code {
        KeyCode::Esc => {
            if state.prompt_mode == PromptMode::Filter {
                state.set_list_filter("");
            }
            finish_prompt(state);
            vec![]
        }
        KeyCode::Enter => {
            let text = state.prompt.take_text();
            finish_prompt(state);
            match state.prompt_mode {
                PromptMode::Filter => vec![],
                PromptMode::Command => run_prompt_command(state, &text, ctx),
            }
        }
        KeyCode::Backspace => {
            state.prompt.delete_back();
            sync_filter(state);
            vec![]
        }
        KeyCode::Left => {
            state.prompt.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.prompt.move_right();
            vec![]
        }
        KeyCode::Up => {
            state.prompt.history_up();
            vec![]
        }
        KeyCode::Down => {
            state.prompt.history_down();
            vec![]
        }
        KeyCode::Char(c) => {
            state.prompt.insert_char(c);
            sync_filter(state);
            vec![]
        }
        _ => vec![],
    }
}

fn finish_prompt(state: &mut AppState) {
    state.focus = match state.prompt_mode {
        PromptMode::Command => FocusPanel::Menu,
        PromptMode::Filter => state.filter_panel,
    };
    state.dirty = true;
}

/// The filter follows the prompt text as it is typed.
fn sync_filter(state: &mut AppState) {
    if state.prompt_mode == PromptMode::Filter {
        let text = state.prompt.text.clone();
        state.set_list_filter(&text);
    }
}

fn run_prompt_command(state: &mut AppState, text: &str, ctx: &HandlerContext<'_>) -> Vec<Action> {
    let Some(command) = parse_prompt(text) else {
        return vec![];
    };
    let event = ClickEvent::new(PROMPT_CONTROL).with_argument(command.argument);
    match ctx.registry.invoke(&command.name, &event) {
        Ok(actions) => actions,
        Err(e) => {
            state.fail(e.to_string());
            vec![]
        }
    }
}
