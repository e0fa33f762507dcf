use std::fmt::Write;

use gam::{Gam, GlyphStyle, Gid};
use gam::menu::*;

use crate::stopwatch::StopwatchState;
use stopwatch_core::{format_hms_cs, format_lap, Controls, RunState};

const LAP_LINE_HEIGHT: isize = 22;
const LAP_LIST_TOP: isize = 124;

pub fn clear_screen(gam: &Gam, content: Gid, screensize: Point) {
    gam.draw_rectangle(
        content,
        Rectangle::new_with_style(
            Point::new(0, 0),
            screensize,
            DrawStyle {
                fill_color: Some(PixelColor::Light),
                stroke_color: None,
                stroke_width: 0,
            },
        ),
    )
    .expect("can't clear");
}

pub fn draw_help(gam: &Gam, content: Gid, screensize: Point, help_text: &str) {
    clear_screen(gam, content, screensize);

    let line_height = 20;
    let mut y = 16isize;

    for line in help_text.lines() {
        if y + line_height > screensize.y - 40 {
            break;
        }
        let style = if y == 16 { GlyphStyle::Bold } else { GlyphStyle::Small };
        let mut tv = TextView::new(
            content,
            TextBounds::BoundingBox(Rectangle::new_coords(16, y, screensize.x - 16, y + line_height - 2)),
        );
        tv.style = style;
        tv.clear_area = true;
        write!(tv.text, "{}", line).unwrap();
        gam.post_textview(&mut tv).expect("can't post help line");
        y += line_height;
    }

    let mut nav_tv = TextView::new(
        content,
        TextBounds::BoundingBox(Rectangle::new_coords(12, screensize.y - 30, screensize.x - 12, screensize.y - 8)),
    );
    nav_tv.style = GlyphStyle::Small;
    nav_tv.clear_area = true;
    write!(nav_tv.text, "Press any key to close").unwrap();
    gam.post_textview(&mut nav_tv).expect("can't post footer");

    gam.redraw().expect("can't redraw");
}

/// How many lap rows fit between the time display and the footer.
fn visible_lap_rows(screensize: Point) -> usize {
    let list_bottom = screensize.y - 60;
    ((list_bottom - LAP_LIST_TOP) / LAP_LINE_HEIGHT).max(0) as usize
}

fn footer_text(state: RunState) -> String {
    let controls = Controls::for_state(state);
    let mut footer = String::new();
    if controls.start {
        write!(footer, "s={}  ", Controls::start_label(state).to_lowercase()).unwrap();
    }
    if controls.pause {
        footer.push_str("p=pause  ");
    }
    if controls.lap {
        footer.push_str("l=lap  ");
    }
    if controls.reset {
        footer.push_str("r=reset");
    }
    footer.push_str("\nF1=help  SPACE=start/pause  F4=quit");
    footer
}

pub fn draw_stopwatch(gam: &Gam, content: Gid, screensize: Point, state: &StopwatchState) {
    clear_screen(gam, content, screensize);
    let model = &state.model;

    // Header
    let mut title_tv = TextView::new(
        content,
        TextBounds::BoundingBox(Rectangle::new_coords(12, 8, screensize.x - 12, 36)),
    );
    title_tv.style = GlyphStyle::Bold;
    title_tv.clear_area = true;
    write!(title_tv.text, "STOPWATCH  [{:?}]", model.state()).unwrap();
    gam.post_textview(&mut title_tv).expect("can't post title");

    // Time display
    let time_str = format_hms_cs(model.elapsed_ms());
    let mut time_tv = TextView::new(
        content,
        TextBounds::BoundingBox(Rectangle::new_coords(20, 50, screensize.x - 20, 90)),
    );
    time_tv.style = GlyphStyle::Bold;
    time_tv.clear_area = true;
    write!(time_tv.text, "  {}", time_str).unwrap();
    gam.post_textview(&mut time_tv).expect("can't post time");

    // Lap list (most recent first)
    let laps = model.laps();
    if laps.is_empty() {
        let mut tv = TextView::new(
            content,
            TextBounds::BoundingBox(Rectangle::new_coords(20, LAP_LIST_TOP, screensize.x - 20, LAP_LIST_TOP + 30)),
        );
        tv.style = GlyphStyle::Small;
        tv.clear_area = true;
        write!(tv.text, "No laps recorded yet").unwrap();
        gam.post_textview(&mut tv).expect("can't post empty");
    } else {
        let rows = laps
            .iter()
            .rev()
            .skip(state.lap_scroll_offset)
            .take(visible_lap_rows(screensize));
        for (i, lap) in rows.enumerate() {
            let y = LAP_LIST_TOP + (i as isize) * LAP_LINE_HEIGHT;
            let mut tv = TextView::new(
                content,
                TextBounds::BoundingBox(Rectangle::new_coords(20, y, screensize.x - 20, y + LAP_LINE_HEIGHT - 2)),
            );
            tv.style = GlyphStyle::Small;
            tv.clear_area = true;
            write!(tv.text, "{}", format_lap(lap)).unwrap();
            gam.post_textview(&mut tv).expect("can't post lap");
        }
    }

    // Footer
    let mut nav_tv = TextView::new(
        content,
        TextBounds::BoundingBox(Rectangle::new_coords(12, screensize.y - 50, screensize.x - 12, screensize.y - 10)),
    );
    nav_tv.style = GlyphStyle::Small;
    nav_tv.clear_area = true;
    write!(nav_tv.text, "{}", footer_text(model.state())).unwrap();
    gam.post_textview(&mut nav_tv).expect("can't post footer");

    gam.redraw().expect("can't redraw");
}
