use crate::config;
use crate::events::AppEvent;
use crate::gui::mount::{self, Mount};
use crate::gui::ring::{self, Deck};
use crate::gui::theme::{self, ThemeColors};
use carousel::{Direction, Input, Point, Response};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub deck: Rc<RefCell<Deck>>,
    pub status: String,
    pub drawing_area: gtk::DrawingArea,
    pub mount: Option<Mount>,
}

#[derive(Debug)]
pub enum AppMsg {
    Input(Input),
    Click(Point),
    Resize(f64, f64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Deck, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Memoria"),
            set_default_size: (1280, 800),

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "memoria-ring",
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_halign: gtk::Align::Center,
                    set_spacing: 12,
                    add_css_class: "memoria-controls",

                    gtk::Button {
                        set_label: "‹",
                        set_tooltip_text: Some("Previous card"),
                        connect_clicked => AppMsg::Input(Input::Navigate(Direction::Previous)),
                    },

                    gtk::Label {
                        add_css_class: "memoria-status",
                        #[watch]
                        set_label: &model.status,
                    },

                    gtk::Button {
                        set_label: "›",
                        set_tooltip_text: Some("Next card"),
                        connect_clicked => AppMsg::Input(Input::Navigate(Direction::Next)),
                    },
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (deck, rx) = init;

        theme::load_css();

        let status = deck.status();
        let deck = Rc::new(RefCell::new(deck));

        let model = AppModel {
            deck: deck.clone(),
            status,
            drawing_area: gtk::DrawingArea::default(),
            mount: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let deck_draw = model.deck.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = ring::draw(cr, &deck_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.mount = Some(mount::mount(
            &root,
            &widgets.drawing_area,
            sender.input_sender().clone(),
        ));

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let response = match msg {
            AppMsg::Input(input) => self.deck.borrow_mut().handle(input),
            AppMsg::Click(point) => self.deck.borrow_mut().click(point),
            AppMsg::Resize(width, height) => self.deck.borrow_mut().set_viewport(width, height),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.deck.borrow_mut().reload(&new_config);
                    log::info!("Configuration reloaded");
                    Response::new(true, true)
                }
                Err(e) => {
                    log::error!("Failed to reload config: {}", e);
                    Response::none()
                }
            },
        };
        self.apply(response);
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        if let Some(mount) = self.mount.take() {
            mount.unmount();
        }
    }
}

impl AppModel {
    fn apply(&mut self, response: Response) {
        let deck = self.deck.borrow();

        if response.capture {
            self.drawing_area.set_cursor_from_name(Some("grabbing"));
        } else if !deck.carousel.is_dragging() {
            self.drawing_area.set_cursor_from_name(None);
        }

        if response.redraw || response.relayout {
            self.drawing_area.queue_draw();
        }
        self.status = deck.status();
    }
}
