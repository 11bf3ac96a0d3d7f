//! Copying the Pix key: the platform clipboard first, a legacy copy path when that is
//! unavailable, and a labelled outcome either way.

#[cfg(not(target_arch = "wasm32"))]
use std::sync::Mutex;

use bevy::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

use super::config::DonationConfig;
use crate::error::ClipboardError;

/// Something that can put text on a clipboard
pub trait ClipboardWriter: Send + Sync {
    /// The preferred API. `Unavailable` means "try the fallback", anything else is final.
    fn write_platform(&self, text: &str) -> Result<(), ClipboardError>;

    fn write_fallback(&self, text: &str) -> Result<(), ClipboardError>;
}

/// `arboard` with a piped copy command behind it on native targets, the async Clipboard API
/// with `execCommand("copy")` behind it in the browser.
#[derive(Default)]
pub struct SystemClipboard {
    #[cfg(not(target_arch = "wasm32"))]
    platform: HeldHandle<arboard::Clipboard>,
}

/// Opens a clipboard handle on first use and keeps it for the life of the app. On X11 and
/// Wayland the copied text is only served while its owner is alive, so a handle dropped right
/// after `set_text` loses the copy.
#[cfg(not(target_arch = "wasm32"))]
pub struct HeldHandle<T> {
    slot: Mutex<Option<T>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl<T> Default for HeldHandle<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<T> HeldHandle<T> {
    /// Runs `apply` on the held handle, opening it with `open` first if needed. A handle that
    /// failed a write is dropped so the next copy opens a fresh one.
    pub fn with<R>(
        &self,
        open: impl FnOnce() -> Result<T, ClipboardError>,
        apply: impl FnOnce(&mut T) -> Result<R, ClipboardError>,
    ) -> Result<R, ClipboardError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| ClipboardError::Write("clipboard handle lock poisoned".to_string()))?;
        if slot.is_none() {
            *slot = Some(open()?);
        }
        let Some(handle) = slot.as_mut() else {
            return Err(ClipboardError::Unavailable(
                "clipboard handle was not opened".to_string(),
            ));
        };

        let result = apply(handle);
        if result.is_err() {
            *slot = None;
        }
        result
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool { self.slot.lock().is_ok_and(|slot| slot.is_some()) }
}

#[cfg(not(target_arch = "wasm32"))]
impl ClipboardWriter for SystemClipboard {
    fn write_platform(&self, text: &str) -> Result<(), ClipboardError> {
        self.platform.with(
            || {
                arboard::Clipboard::new()
                    .map_err(|error| ClipboardError::Unavailable(error.to_string()))
            },
            |clipboard| {
                clipboard
                    .set_text(text)
                    .map_err(|error| ClipboardError::Write(error.to_string()))
            },
        )
    }

    fn write_fallback(&self, text: &str) -> Result<(), ClipboardError> {
        let mut failures = Vec::new();
        for (program, args) in fallback::COMMANDS {
            match fallback::pipe_to(program, args, text) {
                Ok(()) => {
                    debug!("copied with `{program}`");
                    return Ok(());
                },
                Err(reason) => failures.push(reason),
            }
        }

        if failures.is_empty() {
            Err(ClipboardError::Fallback(
                "no copy command for this platform".to_string(),
            ))
        } else {
            Err(ClipboardError::Fallback(failures.join("; ")))
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl ClipboardWriter for SystemClipboard {
    /// Hands the text to `navigator.clipboard.writeText`. The promise settles after this
    /// returns, so a rejection is only logged.
    fn write_platform(&self, text: &str) -> Result<(), ClipboardError> {
        let window = web_sys::window()
            .ok_or_else(|| ClipboardError::Unavailable("no window".to_string()))?;
        let navigator = window.navigator();
        let has_clipboard =
            js_sys::Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false);
        if !window.is_secure_context() || !has_clipboard {
            return Err(ClipboardError::Unavailable(
                "Clipboard API needs a secure context".to_string(),
            ));
        }

        let pending = wasm_bindgen_futures::JsFuture::from(navigator.clipboard().write_text(text));
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(error) = pending.await {
                error!("browser refused the clipboard write: {error:?}");
            }
        });
        Ok(())
    }

    /// The legacy path: select an off-screen textarea and run `execCommand("copy")`
    fn write_fallback(&self, text: &str) -> Result<(), ClipboardError> {
        let fallback_error = |error: JsValue| ClipboardError::Fallback(format!("{error:?}"));

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ClipboardError::Fallback("no document".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| ClipboardError::Fallback("no document body".to_string()))?;
        let textarea = document
            .create_element("textarea")
            .map_err(fallback_error)?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|element| fallback_error(element.into()))?;

        textarea.set_value(text);
        let style = textarea.style();
        for (property, value) in [("position", "fixed"), ("left", "-9999px"), ("top", "-9999px")] {
            style.set_property(property, value).map_err(fallback_error)?;
        }
        body.append_child(&textarea).map_err(fallback_error)?;
        textarea.select();

        let copied = document
            .dyn_ref::<web_sys::HtmlDocument>()
            .ok_or_else(|| ClipboardError::Fallback("not an HTML document".to_string()))
            .and_then(|html| html.exec_command("copy").map_err(fallback_error));
        textarea.remove();

        if copied? {
            Ok(())
        } else {
            Err(ClipboardError::Fallback(
                "execCommand(\"copy\") was refused".to_string(),
            ))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod fallback {
    use std::io::Write;
    use std::process::Command;
    use std::process::Stdio;

    #[cfg(target_os = "linux")]
    pub const COMMANDS: &[(&str, &[&str])] = &[
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ];

    #[cfg(target_os = "macos")]
    pub const COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

    #[cfg(target_os = "windows")]
    pub const COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    pub const COMMANDS: &[(&str, &[&str])] = &[];

    pub fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<(), String> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|error| format!("{program}: {error}"))?;

        // dropping stdin closes the pipe so the command sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|error| format!("{program}: {error}"))?;
        }

        let status = child
            .wait()
            .map_err(|error| format!("{program}: {error}"))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("{program} exited with {status}"))
        }
    }
}

/// The clipboard the copy button writes to. Swappable so tests never touch the real one.
#[derive(Resource)]
pub struct PixClipboard(pub Box<dyn ClipboardWriter>);

impl Default for PixClipboard {
    fn default() -> Self { Self(Box::new(SystemClipboard::default())) }
}

impl PixClipboard {
    pub fn writer(&self) -> &dyn ClipboardWriter { self.0.as_ref() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    CopiedWithFallback,
    Failed(ClipboardError),
}

impl CopyOutcome {
    /// What the copy button says while the feedback is showing
    pub fn label<'a>(&self, config: &'a DonationConfig) -> &'a str {
        match self {
            Self::Copied => &config.copied_label,
            Self::CopiedWithFallback => &config.fallback_label,
            Self::Failed(_) => &config.error_label,
        }
    }
}

/// Only an unavailable platform clipboard falls through to the fallback. A clipboard that
/// opened and then refused the text is reported as is.
pub fn copy_text(writer: &dyn ClipboardWriter, text: &str) -> CopyOutcome {
    match writer.write_platform(text) {
        Ok(()) => CopyOutcome::Copied,
        Err(ClipboardError::Unavailable(reason)) => {
            debug!("platform clipboard unavailable ({reason}), trying fallback");
            match writer.write_fallback(text) {
                Ok(()) => CopyOutcome::CopiedWithFallback,
                Err(error) => CopyOutcome::Failed(error),
            }
        },
        Err(error) => CopyOutcome::Failed(error),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;

    /// Records what it was asked to write and answers with canned results
    pub struct FakeClipboard {
        pub platform: Result<(), ClipboardError>,
        pub fallback: Result<(), ClipboardError>,
        pub written:  Arc<Mutex<Vec<String>>>,
    }

    impl FakeClipboard {
        pub fn new(
            platform: Result<(), ClipboardError>,
            fallback: Result<(), ClipboardError>,
        ) -> Self {
            Self {
                platform,
                fallback,
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn failing() -> Self {
            Self::new(
                Err(ClipboardError::Unavailable("headless".into())),
                Err(ClipboardError::Fallback("no command".into())),
            )
        }
    }

    impl ClipboardWriter for FakeClipboard {
        fn write_platform(&self, text: &str) -> Result<(), ClipboardError> {
            if self.platform.is_ok() {
                self.written.lock().unwrap().push(text.to_string());
            }
            self.platform.clone()
        }

        fn write_fallback(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fallback.is_ok() {
                self.written.lock().unwrap().push(text.to_string());
            }
            self.fallback.clone()
        }
    }

    #[test]
    fn platform_success_skips_fallback() {
        let fake = FakeClipboard::new(Ok(()), Err(ClipboardError::Fallback("unused".into())));
        assert_eq!(copy_text(&fake, "key"), CopyOutcome::Copied);
        assert_eq!(*fake.written.lock().unwrap(), vec!["key".to_string()]);
    }

    #[test]
    fn unavailable_platform_uses_fallback() {
        let fake = FakeClipboard::new(Err(ClipboardError::Unavailable("no display".into())), Ok(()));
        assert_eq!(copy_text(&fake, "key"), CopyOutcome::CopiedWithFallback);
    }

    #[test]
    fn write_failure_does_not_fall_back() {
        let fake = FakeClipboard::new(Err(ClipboardError::Write("denied".into())), Ok(()));
        assert_eq!(
            copy_text(&fake, "key"),
            CopyOutcome::Failed(ClipboardError::Write("denied".into()))
        );
        assert!(fake.written.lock().unwrap().is_empty());
    }

    #[test]
    fn both_failing_reports_the_fallback_error() {
        assert_eq!(
            copy_text(&FakeClipboard::failing(), "key"),
            CopyOutcome::Failed(ClipboardError::Fallback("no command".into()))
        );
    }

    #[test]
    fn held_handle_opens_once_and_is_reused() {
        let held = HeldHandle::<Vec<String>>::default();
        let mut opened = 0;

        for text in ["first", "second"] {
            held.with(
                || {
                    opened += 1;
                    Ok(Vec::new())
                },
                |handle| {
                    handle.push(text.to_string());
                    Ok(())
                },
            )
            .unwrap();
        }

        assert_eq!(opened, 1);
        assert!(held.is_open());
        let written = held.with(|| Ok(Vec::new()), |handle| Ok(handle.clone())).unwrap();
        assert_eq!(written, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn held_handle_reopens_after_a_failed_write() {
        let held = HeldHandle::<u32>::default();

        let failed = held.with(
            || Ok(1),
            |_| Err::<(), _>(ClipboardError::Write("denied".into())),
        );
        assert_eq!(failed, Err(ClipboardError::Write("denied".into())));
        assert!(!held.is_open());

        let generation = held.with(|| Ok(2), |handle| Ok(*handle)).unwrap();
        assert_eq!(generation, 2);
    }

    #[test]
    fn held_handle_stays_closed_when_opening_fails() {
        let held = HeldHandle::<u32>::default();
        let result = held.with(
            || Err(ClipboardError::Unavailable("no display".into())),
            |handle| Ok(*handle),
        );
        assert_eq!(result, Err(ClipboardError::Unavailable("no display".into())));
        assert!(!held.is_open());
    }

    #[test]
    fn labels_follow_the_outcome() {
        let config = DonationConfig::default();
        assert_eq!(CopyOutcome::Copied.label(&config), "Copiado!");
        assert_eq!(CopyOutcome::CopiedWithFallback.label(&config), "Copiado (Fallback)!");
        assert_eq!(
            CopyOutcome::Failed(ClipboardError::Write(String::new())).label(&config),
            "Erro!"
        );
    }
}
