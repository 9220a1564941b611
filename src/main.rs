mod api;
mod app;
mod form;
mod input;
mod preview;
mod suggest;
mod timer;
mod typeahead;
mod widgets;

use std::io;

#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};

#[cfg(target_arch = "wasm32")]
use ratzilla::event::{KeyCode, KeyEvent, MouseButton, MouseEventKind};
#[cfg(target_arch = "wasm32")]
use ratzilla::ratatui::Terminal;
#[cfg(target_arch = "wasm32")]
use ratzilla::{DomBackend, WebRenderer};

#[cfg(target_arch = "wasm32")]
use app::{App, AppRequest};
#[cfg(target_arch = "wasm32")]
use form::save::LocalStore;
#[cfg(target_arch = "wasm32")]
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent, Key};

/// Millisecond timestamp driving debounce and notice timers.
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Map a browser key event onto the normalized key set. Shift+Tab arrives
/// as Tab with the shift flag.
#[cfg(target_arch = "wasm32")]
fn map_key(event: &KeyEvent) -> Option<Key> {
    Some(match event.code {
        KeyCode::Tab if event.shift => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    })
}

/// Query the grid container's bounding rect and convert pixel coordinates
/// to a terminal cell.
#[cfg(target_arch = "wasm32")]
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Run one async backend call and merge the outcome back into the app.
#[cfg(target_arch = "wasm32")]
fn dispatch(app: &Rc<RefCell<App<LocalStore>>>, request: AppRequest) {
    match request {
        AppRequest::Summarize(req) => {
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::summarize(&req)
                    .await
                    .map(|r| r.summary)
                    .map_err(|e| e.to_string());
                app.borrow_mut().finish_summarize(result);
            });
        }
        AppRequest::SaveResume => {
            let Some(draft) = app.borrow().preview_draft().cloned() else {
                return;
            };
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match api::auth_token() {
                    Some(token) => api::save_resume(&draft, &token)
                        .await
                        .map_err(|e| e.to_string()),
                    None => Err("Sign in to save your resume".to_string()),
                };
                app.borrow_mut().finish_save(result);
            });
        }
        AppRequest::VerifyPayment(req) => {
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match api::auth_token() {
                    Some(token) => api::verify_payment(&req, &token)
                        .await
                        .map(|r| r.paid)
                        .map_err(|e| e.to_string()),
                    None => Err("Sign in to export your resume".to_string()),
                };
                app.borrow_mut().finish_export(result);
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn run() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let app = Rc::new(RefCell::new(App::new(LocalStore)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let Some(key) = map_key(&key_event) else {
                return;
            };
            let request = app
                .borrow_mut()
                .handle_input(&InputEvent::Key(key), now_ms());
            if let Some(request) = request {
                dispatch(&app, request);
            }
        }
    });

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let action_id = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                .and_then(|(col, row)| cs.hit_test(col, row));
            drop(cs);

            if let Some(id) = action_id {
                let request = app
                    .borrow_mut()
                    .handle_input(&InputEvent::Click(id), now_ms());
                if let Some(request) = request {
                    dispatch(&app, request);
                }
            }
        }
    });

    terminal.draw_web({
        let app = app.clone();
        let click_state = click_state.clone();
        move |f| {
            let mut a = app.borrow_mut();
            a.tick(now_ms());

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            a.render(f, size, &click_state);
        }
    });

    Ok(())
}

fn main() -> io::Result<()> {
    #[cfg(target_arch = "wasm32")]
    return run();

    #[cfg(not(target_arch = "wasm32"))]
    Ok(())
}
