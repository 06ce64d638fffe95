use memoria::config;
use memoria::gui::app::AppModel;
use memoria::gui::ring::Deck;
use memoria::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let deck = Deck::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.memoria");

    app.run::<AppModel>((deck, rx));
}
