//! Borderless topmost windows covering the selected monitors.

use std::ffi::c_void;

use blackout_common::error::{BlackoutError, BlackoutResult};
use blackout_platform_core::MonitorRecord;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{CreateSolidBrush, DeleteObject, HBRUSH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    GetWindowLongPtrW, LoadCursorW, PostQuitMessage, PostThreadMessageW, RegisterClassW,
    SetWindowLongPtrW, ShowCursor, ShowWindow, TranslateMessage, UnregisterClassW,
    UpdateWindow, CREATESTRUCTW, GWLP_USERDATA, IDC_ARROW, MSG, SW_SHOW, WM_CLOSE, WM_DESTROY,
    WM_KEYDOWN, WM_NCCREATE, WM_QUIT, WNDCLASSW, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
    WS_VISIBLE,
};

use crate::OverlayOptions;

const CLASS_NAME: PCWSTR = w!("BlackoutCoverWindow");
const WINDOW_TITLE: PCWSTR = w!("Blackout");

/// Per-window behaviour, reachable from the window procedure via
/// `GWLP_USERDATA`.
struct WindowState {
    exit_on_key: bool,
}

pub(crate) fn run(monitors: &[MonitorRecord], options: &OverlayOptions) -> BlackoutResult<()> {
    let instance: HINSTANCE = unsafe { GetModuleHandleW(None) }
        .map_err(|e| BlackoutError::overlay(format!("GetModuleHandleW failed: {e}")))?
        .into();

    let brush = unsafe { CreateSolidBrush(COLORREF(options.color.to_colorref())) };
    let registered = register_class(instance, brush);
    if let Err(e) = registered {
        unsafe {
            let _ = DeleteObject(brush.into());
        }
        return Err(e);
    }

    let state = Box::new(WindowState {
        exit_on_key: options.exit_on_key,
    });
    let covers = create_windows(instance, monitors, &state);

    let result = if covers.is_empty() {
        Err(BlackoutError::overlay("no covering window could be created"))
    } else {
        install_interrupt_handler();
        if options.hide_cursor {
            let _ = unsafe { ShowCursor(false) };
        }
        pump_messages();
        if options.hide_cursor {
            let _ = unsafe { ShowCursor(true) };
        }
        Ok(())
    };

    for hwnd in covers {
        if let Err(e) = unsafe { DestroyWindow(hwnd) } {
            tracing::debug!("DestroyWindow failed: {}", e);
        }
    }
    unsafe {
        let _ = UnregisterClassW(CLASS_NAME, Some(instance));
        let _ = DeleteObject(brush.into());
    }
    drop(state);

    tracing::info!("Covering windows closed");
    result
}

fn register_class(instance: HINSTANCE, brush: HBRUSH) -> BlackoutResult<()> {
    let class = WNDCLASSW {
        lpfnWndProc: Some(window_proc),
        hInstance: instance,
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
        hbrBackground: brush,
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };

    if unsafe { RegisterClassW(&class) } == 0 {
        return Err(BlackoutError::overlay(format!(
            "RegisterClassW failed: {}",
            std::io::Error::last_os_error()
        )));
    }
    Ok(())
}

fn create_windows(
    instance: HINSTANCE,
    monitors: &[MonitorRecord],
    state: &WindowState,
) -> Vec<HWND> {
    let state_ptr = state as *const WindowState as *const c_void;

    monitors
        .iter()
        .filter_map(|monitor| {
            let rect = monitor.geometry();
            let created = unsafe {
                CreateWindowExW(
                    WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
                    CLASS_NAME,
                    WINDOW_TITLE,
                    WS_POPUP | WS_VISIBLE,
                    rect.left,
                    rect.top,
                    rect.width(),
                    rect.height(),
                    None,
                    None,
                    Some(instance),
                    Some(state_ptr),
                )
            };

            match created {
                Ok(hwnd) => {
                    unsafe {
                        let _ = ShowWindow(hwnd, SW_SHOW);
                        let _ = UpdateWindow(hwnd);
                    }
                    tracing::info!(
                        index = monitor.display_index(),
                        name = monitor.friendly_name(),
                        "Covering monitor"
                    );
                    Some(hwnd)
                }
                Err(e) => {
                    tracing::warn!(
                        index = monitor.display_index(),
                        "CreateWindowExW failed: {}",
                        e
                    );
                    None
                }
            }
        })
        .collect()
}

/// Ctrl+C posts `WM_QUIT` to this thread so the windows are torn down
/// instead of the process dying with the cursor hidden.
fn install_interrupt_handler() {
    let thread_id = unsafe { GetCurrentThreadId() };
    let installed = ctrlc::set_handler(move || unsafe {
        let _ = PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
    });
    if let Err(e) = installed {
        tracing::warn!("Could not install Ctrl+C handler: {}", e);
    }
}

fn pump_messages() {
    let mut message = MSG::default();
    loop {
        let status = unsafe { GetMessageW(&mut message, None, 0, 0) };
        match status.0 {
            0 => break,
            -1 => {
                tracing::warn!(
                    "GetMessageW failed: {}",
                    std::io::Error::last_os_error()
                );
                break;
            }
            _ => unsafe {
                let _ = TranslateMessage(&message);
                let _ = DispatchMessageW(&message);
            },
        }
    }
}

extern "system" fn window_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_NCCREATE => {
                let create = &*(lparam.0 as *const CREATESTRUCTW);
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, create.lpCreateParams as isize);
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
            WM_KEYDOWN => {
                let state = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const WindowState;
                if state.as_ref().map_or(true, |s| s.exit_on_key) {
                    PostQuitMessage(0);
                }
                LRESULT(0)
            }
            WM_CLOSE | WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
