//! System tray integration
//!
//! Owns the tray icon, rebuilds its menu from every file-list snapshot, and
//! maps menu clicks back to coordinator commands. The menu structure comes
//! from [`TrayMenuModel`]; this module only renders it and keeps a
//! `MenuId` -> [`UiCommand`] binding table alongside each rebuild.

use snapshelf::config::ConfigManager;
use snapshelf::error::{Result, SnapshelfError, StringError};
use snapshelf::events::{CoordinatorEvent, ListSnapshot, UiCommand};
use snapshelf::tray::{FILE_MENU_ACTIONS, TrayMenuModel, labels};
use std::collections::HashMap;
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tray_icon::{
    Icon, TrayIconBuilder,
    menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem, Submenu},
};

/// Tray icon plus the click-to-command binding table
pub struct TrayController {
    tray: tray_icon::TrayIcon,
    event_tx: mpsc::SyncSender<CoordinatorEvent>,
    snapshot_rx: mpsc::Receiver<ListSnapshot>,
    bindings: HashMap<MenuId, UiCommand>,
}

impl TrayController {
    /// Create the tray icon with an empty menu
    ///
    /// The first snapshot (delivered on consumer registration) populates the
    /// menu once [`run`](TrayController::run) starts pumping.
    pub fn new(
        event_tx: mpsc::SyncSender<CoordinatorEvent>,
        snapshot_rx: mpsc::Receiver<ListSnapshot>,
    ) -> Result<Self> {
        info!("Creating system tray icon");

        let mut bindings = HashMap::new();
        let menu = build_menu(&TrayMenuModel::default(), &mut bindings)?;

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_icon(default_icon()?)
            .with_tooltip("snapshelf")
            .build()
            .map_err(|e| SnapshelfError::ConfigError(Box::new(e)))?;

        Ok(Self {
            tray,
            event_tx,
            snapshot_rx,
            bindings,
        })
    }

    /// Replace the menu with one rebuilt from `snapshot`
    fn rebuild(&mut self, snapshot: &ListSnapshot) -> Result<()> {
        debug!(
            "Rebuilding tray menu from snapshot seq {} ({} files)",
            snapshot.seq,
            snapshot.files.len()
        );
        let model = TrayMenuModel::from_files(&snapshot.files);
        let mut bindings = HashMap::new();
        let menu = build_menu(&model, &mut bindings)?;
        self.tray.set_menu(Some(Box::new(menu)));
        self.bindings = bindings;
        Ok(())
    }

    /// Process menu clicks and snapshots until Exit is chosen
    ///
    /// Returns when the user picks Exit (after forwarding the quit command) or
    /// when the coordinator goes away.
    pub fn run(&mut self) {
        let menu_events = MenuEvent::receiver();

        'outer: loop {
            // Apply only the newest pending snapshot; intermediate menus
            // would be replaced before anyone could open them
            if let Some(snapshot) = self.snapshot_rx.try_iter().last() {
                if let Err(e) = self.rebuild(&snapshot) {
                    warn!("Tray menu rebuild failed: {}", e);
                }
            }

            while let Ok(event) = menu_events.try_recv() {
                if !self.handle_click(&event.id) {
                    break 'outer;
                }
            }

            std::thread::sleep(Duration::from_millis(100));
        }

        info!("Tray loop exited");
    }

    /// Forward one click; returns `false` when the loop should stop
    fn handle_click(&self, id: &MenuId) -> bool {
        let Some(command) = self.bindings.get(id) else {
            // Stale id from a menu that was already replaced
            debug!("Ignoring click on unknown menu id {:?}", id);
            return true;
        };

        let quit = matches!(command, UiCommand::Quit);
        if self.event_tx.send(CoordinatorEvent::Ui(command.clone())).is_err() {
            warn!("Coordinator is gone, stopping tray loop");
            return false;
        }
        !quit
    }
}

/// Render the model into a `tray-icon` menu, filling the binding table
fn build_menu(model: &TrayMenuModel, bindings: &mut HashMap<MenuId, UiCommand>) -> Result<Menu> {
    let menu = Menu::new();

    let latest = Submenu::new(labels::LATEST, !model.latest.is_empty());
    for entry in &model.latest {
        let file_menu = Submenu::new(&entry.label, true);
        for action in FILE_MENU_ACTIONS {
            let item = MenuItem::new(action.label(), true, None);
            bindings.insert(item.id().clone(), action.command(entry.url.clone()));
            file_menu
                .append(&item)
                .map_err(|e| menu_error("file action item", &e))?;
        }
        latest
            .append(&file_menu)
            .map_err(|e| menu_error("file submenu", &e))?;
    }
    menu.append(&latest).map_err(|e| menu_error("Latest", &e))?;

    // TODO: back Browse Images with a gallery window driven by GalleryView;
    // until then it opens the folder in the file manager
    let browse = MenuItem::new(labels::BROWSE_IMAGES, true, None);
    bindings.insert(browse.id().clone(), UiCommand::OpenFolder);
    menu.append(&browse)
        .map_err(|e| menu_error(labels::BROWSE_IMAGES, &e))?;

    let open_folder = MenuItem::new(labels::OPEN_FOLDER, true, None);
    bindings.insert(open_folder.id().clone(), UiCommand::OpenFolder);
    menu.append(&open_folder)
        .map_err(|e| menu_error(labels::OPEN_FOLDER, &e))?;

    menu.append(&PredefinedMenuItem::separator())
        .map_err(|e| menu_error("separator", &e))?;

    // Settings opens the config file in the default editor
    let settings = MenuItem::new(labels::SETTINGS, true, None);
    bindings.insert(
        settings.id().clone(),
        UiCommand::OpenFile(ConfigManager::get_config_path()),
    );
    menu.append(&settings)
        .map_err(|e| menu_error(labels::SETTINGS, &e))?;

    let exit = MenuItem::new(labels::EXIT, true, None);
    bindings.insert(exit.id().clone(), UiCommand::Quit);
    menu.append(&exit).map_err(|e| menu_error(labels::EXIT, &e))?;

    Ok(menu)
}

fn menu_error(what: &str, source: &dyn std::fmt::Display) -> SnapshelfError {
    SnapshelfError::ConfigError(StringError::new(format!(
        "Failed to add {what} menu item: {source}"
    )))
}

/// Simple 32x32 camera-shutter-less placeholder icon
fn default_icon() -> Result<Icon> {
    const ICON_SIZE: usize = 32;
    let mut rgba = vec![0u8; ICON_SIZE * ICON_SIZE * 4];

    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let idx = (y * ICON_SIZE + x) * 4;
            let border = x == 0 || x == ICON_SIZE - 1 || y == 0 || y == ICON_SIZE - 1;
            let (r, g, b) = if border { (20, 60, 100) } else { (40, 120, 200) };
            rgba[idx] = r;
            rgba[idx + 1] = g;
            rgba[idx + 2] = b;
            rgba[idx + 3] = 255;
        }
    }

    Icon::from_rgba(rgba, ICON_SIZE as u32, ICON_SIZE as u32)
        .map_err(|e| SnapshelfError::ConfigError(Box::new(e)))
}
