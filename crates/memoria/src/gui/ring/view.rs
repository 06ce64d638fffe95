use super::model::{CardFace, CardGeometry, Deck};
use super::{
    AWAY_ALPHA, BODY_SIZE, CARD_PADDING, CORNER_RADIUS, LINE_SPACING, OUTLINE_WIDTH, TITLE_SIZE,
};
use crate::config::ViewConfig;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use carousel::Card;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

struct CardRenderer<'a> {
    face: &'a CardFace,
    card: &'a Card,
    geometry: &'a CardGeometry,
    view: &'a ViewConfig,
    current: bool,
}

impl<'a> CardRenderer<'a> {
    fn new(
        face: &'a CardFace,
        card: &'a Card,
        geometry: &'a CardGeometry,
        view: &'a ViewConfig,
        current: bool,
    ) -> Self {
        Self {
            face,
            card,
            geometry,
            view,
            current,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        // draw in card units centred on the origin; the projection squashes it
        cr.translate(self.geometry.center.x, self.geometry.center.y);
        cr.scale(
            self.geometry.width / self.view.card_width,
            self.geometry.height / self.view.card_height,
        );

        if self.geometry.facing {
            self.draw_card(cr, colors)?;
        } else {
            cr.push_group();
            self.draw_card(cr, colors)?;
            cr.pop_group_to_source()?;
            cr.paint_with_alpha(AWAY_ALPHA)?;
        }
        cr.restore()
    }

    fn draw_card(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_panel(cr, colors)?;
        if self.current {
            self.draw_outline(cr, colors)?;
        }
        if self.card.flipped {
            self.draw_back(cr, colors)
        } else {
            self.draw_front(cr, colors)
        }
    }

    fn panel_path(&self, cr: &Context) {
        let (w, h) = (self.view.card_width, self.view.card_height);
        let (x, y, r) = (-w / 2.0, -h / 2.0, CORNER_RADIUS.min(w / 2.0).min(h / 2.0));

        cr.new_sub_path();
        cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
        cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
        cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
        cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
        cr.close_path();
    }

    fn draw_panel(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let state = FaceState::resolve(self.card);
        set_source(cr, state.color(colors));
        self.panel_path(cr);
        cr.fill()
    }

    fn draw_outline(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, colors.current);
        cr.set_line_width(OUTLINE_WIDTH);
        self.panel_path(cr);
        cr.stroke()
    }

    fn draw_front(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let top = -self.view.card_height / 2.0 + CARD_PADDING;
        let below_title = self.draw_lines(cr, colors.text, &self.face.title, TITLE_SIZE, top)?;

        match &self.face.image {
            Some(pixbuf) => self.draw_image(cr, pixbuf, below_title + CARD_PADDING / 2.0),
            None => self
                .draw_lines(cr, colors.text, &self.face.front, BODY_SIZE, below_title + CARD_PADDING)
                .map(|_| ()),
        }
    }

    fn draw_back(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let top = -self.view.card_height / 2.0 + CARD_PADDING;
        // back panel is dark, so the text uses the front panel colour
        self.draw_lines(cr, colors.front, &self.face.back, BODY_SIZE, top)
            .map(|_| ())
    }

    fn draw_image(&self, cr: &Context, pixbuf: &Pixbuf, top: f64) -> Result<(), cairo::Error> {
        let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
        if pw <= 0.0 || ph <= 0.0 {
            return Ok(());
        }
        let max_w = self.view.card_width - 2.0 * CARD_PADDING;
        let max_h = self.view.card_height / 2.0 - CARD_PADDING - top;
        if max_h <= 0.0 {
            return Ok(());
        }
        let scale = (max_w / pw).min(max_h / ph);

        cr.save()?;
        cr.translate(-pw * scale / 2.0, top);
        cr.scale(scale, scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    /// Centred text, one line per `\n`. Returns the y below the last line.
    fn draw_lines(
        &self,
        cr: &Context,
        color: Srgba<f64>,
        text: &str,
        size: f64,
        top: f64,
    ) -> Result<f64, cairo::Error> {
        set_source(cr, color);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(size);

        let mut y = top;
        for line in text.lines() {
            y += size;
            let ext = cr.text_extents(line)?;
            cr.move_to(-ext.width() / 2.0 - ext.x_bearing(), y);
            cr.show_text(line)?;
            y += size * (LINE_SPACING - 1.0);
        }
        Ok(y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaceState {
    Front,
    Back,
}

impl FaceState {
    fn resolve(card: &Card) -> Self {
        if card.flipped { Self::Back } else { Self::Front }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Front => colors.front,
            Self::Back => colors.back,
        }
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(cr: &Context, deck: &Deck, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let current = deck.carousel.current_slot();

    for geometry in deck.geometries().iter().filter(|g| g.is_visible()) {
        let (Some(face), Some(card)) = (deck.face(geometry.slot), deck.carousel.card(geometry.slot))
        else {
            continue;
        };
        CardRenderer::new(face, card, geometry, &deck.view, geometry.slot == current)
            .draw(cr, colors)?;
    }
    Ok(())
}
