use crate::gui::app::AppMsg;
use carousel::{Input, Key, Point};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::Cell;
use std::rc::Rc;

const LEFT_KEYS: [gdk::Key; 2] = [gdk::Key::Left, gdk::Key::KP_Left];
const RIGHT_KEYS: [gdk::Key; 2] = [gdk::Key::Right, gdk::Key::KP_Right];
const ENTER_KEYS: [gdk::Key; 3] = [gdk::Key::Return, gdk::Key::KP_Enter, gdk::Key::ISO_Enter];
const SPACE_KEYS: [gdk::Key; 2] = [gdk::Key::space, gdk::Key::KP_Space];

pub fn map_key(key: gdk::Key) -> Key {
    if LEFT_KEYS.contains(&key) {
        Key::ArrowLeft
    } else if RIGHT_KEYS.contains(&key) {
        Key::ArrowRight
    } else if ENTER_KEYS.contains(&key) {
        Key::Enter
    } else if SPACE_KEYS.contains(&key) {
        Key::Space
    } else {
        Key::Other
    }
}

/// Handle to the input wiring of one ring. Unmounting, or dropping the handle,
/// detaches every controller and signal it installed.
pub struct Mount {
    attached: Vec<(gtk::Widget, gtk::EventController)>,
    resize: Option<(gtk::DrawingArea, glib::SignalHandlerId)>,
}

impl Mount {
    pub fn unmount(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        for (widget, controller) in self.attached.drain(..) {
            widget.remove_controller(&controller);
        }
        if let Some((area, handler)) = self.resize.take() {
            area.disconnect(handler);
        }
    }

    fn attach(&mut self, widget: &impl IsA<gtk::Widget>, controller: impl IsA<gtk::EventController>) {
        widget.add_controller(controller.clone());
        self.attached
            .push((widget.clone().upcast(), controller.upcast()));
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Wires pointer, click and resize handling onto `area` and keyboard handling
/// onto `window`, forwarding everything to `sender`.
pub fn mount(
    window: &gtk::ApplicationWindow,
    area: &gtk::DrawingArea,
    sender: relm4::Sender<AppMsg>,
) -> Mount {
    let mut mount = Mount {
        attached: Vec::new(),
        resize: None,
    };

    mount.attach(area, drag_controller(&sender));
    mount.attach(area, click_controller(&sender));
    mount.attach(window, key_controller(&sender));

    let handler = area.connect_resize(move |_, width, height| {
        sender.emit(AppMsg::Resize(width as f64, height as f64));
    });
    mount.resize = Some((area.clone(), handler));

    mount
}

fn drag_controller(sender: &relm4::Sender<AppMsg>) -> gtk::GestureDrag {
    let drag = gtk::GestureDrag::new();
    // offsets are reported relative to where the drag began
    let start = Rc::new(Cell::new(Point::default()));

    {
        let (sender, start) = (sender.clone(), start.clone());
        drag.connect_drag_begin(move |_, x, y| {
            let at = Point::new(x, y);
            start.set(at);
            sender.emit(AppMsg::Input(Input::PointerDown(at)));
        });
    }
    {
        let (sender, start) = (sender.clone(), start.clone());
        drag.connect_drag_update(move |_, dx, dy| {
            let origin = start.get();
            sender.emit(AppMsg::Input(Input::PointerMove(Point::new(
                origin.x + dx,
                origin.y + dy,
            ))));
        });
    }
    {
        let sender = sender.clone();
        drag.connect_drag_end(move |_, dx, dy| {
            let origin = start.get();
            sender.emit(AppMsg::Input(Input::PointerUp(Point::new(
                origin.x + dx,
                origin.y + dy,
            ))));
        });
    }

    drag
}

fn click_controller(sender: &relm4::Sender<AppMsg>) -> gtk::GestureClick {
    let click = gtk::GestureClick::new();
    let sender = sender.clone();
    click.connect_released(move |_, _, x, y| {
        sender.emit(AppMsg::Click(Point::new(x, y)));
    });
    click
}

fn key_controller(sender: &relm4::Sender<AppMsg>) -> gtk::EventControllerKey {
    let keys = gtk::EventControllerKey::new();
    // run before focused buttons so Space and Enter reach the ring
    keys.set_propagation_phase(gtk::PropagationPhase::Capture);
    let sender = sender.clone();
    keys.connect_key_pressed(move |_, key, _, _| match map_key(key) {
        Key::Other => glib::Propagation::Proceed,
        key => {
            sender.emit(AppMsg::Input(Input::Key(key)));
            glib::Propagation::Stop
        }
    });
    keys
}
