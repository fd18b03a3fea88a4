//! DOM rendering for the dashboard widgets
//!
//! Generated text reaches the page through `create_element` and
//! `set_text_content` only; no markup string assembly.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::data::{
    self, RaidBoss, RaidFilter, RankRow, ServerStats, TopKind,
};

/// Dashboard widget state shared by the refresh and filter handlers
pub struct Dashboard {
    rng: Pcg32,
    filter: RaidFilter,
    raids: Vec<RaidBoss>,
}

impl Dashboard {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            filter: RaidFilter::All,
            raids: Vec::new(),
        }
    }

    /// Regenerate and re-render every widget
    pub fn refresh_all(&mut self, document: &Document) {
        let stats = data::gen_server_stats(&mut self.rng);
        render_stats(document, &stats);

        let pk = data::gen_top_list(&mut self.rng, TopKind::Pk);
        let pvp = data::gen_top_list(&mut self.rng, TopKind::Pvp);
        render_top(document, "topPK", &pk);
        render_top(document, "topPVP", &pvp);
        set_text(document, "pkUpdatedAt", "NOW");
        set_text(document, "pvpUpdatedAt", "NOW");

        self.refresh_raids(document);
    }

    pub fn refresh_raids(&mut self, document: &Document) {
        self.raids = data::gen_raids(&mut self.rng);
        self.render_raids(document);
    }

    pub fn set_filter(&mut self, filter: RaidFilter, document: &Document) {
        self.filter = filter;
        self.render_raids(document);
    }

    fn render_raids(&self, document: &Document) {
        let Some(body) = document.get_element_by_id("raidTableBody") else {
            return;
        };
        body.set_text_content(None);

        let mut any = false;
        for raid in self.raids.iter().filter(|r| self.filter.matches(r.alive)) {
            any = true;
            if let Ok(row) = raid_row(document, raid) {
                let _ = body.append_child(&row);
            }
        }

        if !any {
            if let Ok(row) = empty_row(document) {
                let _ = body.append_child(&row);
            }
        }
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn render_stats(document: &Document, stats: &ServerStats) {
    if let Some(el) = document.get_element_by_id("statOnlineNow") {
        animate_value(el, 0.0, stats.online_now as f64, 2000.0);
    }
    set_text(document, "statUptime", &stats.uptime);
    set_text(document, "statSiege", stats.siege.as_str());
}

fn cell(document: &Document, class: &str, text: &str) -> Result<Element, JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name(class);
    el.set_text_content(Some(text));
    Ok(el)
}

fn rank_row(document: &Document, row: &RankRow) -> Result<Element, JsValue> {
    let root = document.create_element("div")?;
    root.set_class_name("table__row");

    let lead = document.create_element("div")?;
    lead.set_class_name("cell");
    let pos = document.create_element("span")?;
    pos.set_class_name("rank__pos");
    pos.set_text_content(Some(&format!("#{}", row.pos)));
    let name = document.create_element("span")?;
    name.set_class_name("rank__name");
    name.set_text_content(Some(row.name));
    lead.append_child(&pos)?;
    lead.append_child(&name)?;
    root.append_child(&lead)?;

    root.append_child(&cell(document, "cell rank__clan", row.clan)?)?;
    root.append_child(&cell(document, "cell", "")?)?;
    root.append_child(&cell(document, "cell mono", &row.score.to_string())?)?;
    Ok(root)
}

fn render_top(document: &Document, container_id: &str, rows: &[RankRow]) {
    let Some(target) = document.get_element_by_id(container_id) else {
        return;
    };
    target.set_text_content(None);
    for row in rows {
        if let Ok(el) = rank_row(document, row) {
            let _ = target.append_child(&el);
        }
    }
}

fn raid_row(document: &Document, raid: &RaidBoss) -> Result<Element, JsValue> {
    let root = document.create_element("div")?;
    root.set_class_name("table__row");

    root.append_child(&cell(document, "cell font-bold", raid.name)?)?;

    let status = document.create_element("div")?;
    status.set_class_name("cell");
    let pill = document.create_element("span")?;
    pill.set_class_name(if raid.alive {
        "pillstate pillstate--alive"
    } else {
        "pillstate pillstate--dead"
    });
    pill.set_text_content(Some(if raid.alive {
        "SIGNAL_FOUND"
    } else {
        "NO_SIGNAL"
    }));
    status.append_child(&pill)?;
    root.append_child(&status)?;

    root.append_child(&cell(document, "cell muted micro", raid.zone)?)?;
    root.append_child(&cell(document, "cell mono neon-blue", &raid.respawn)?)?;
    Ok(root)
}

fn empty_row(document: &Document) -> Result<Element, JsValue> {
    let root = document.create_element("div")?;
    root.set_class_name("table__row");
    root.append_child(&cell(document, "cell muted", "NO DATA FOUND")?)?;
    Ok(root)
}

/// Animated count-up for a stat readout: its own one-shot rAF chain, done
/// once progress reaches 1
pub fn animate_value(el: Element, start: f64, end: f64, duration_ms: f64) {
    schedule_count(el, start, end, duration_ms, None);
}

fn schedule_count(el: Element, start: f64, end: f64, duration_ms: f64, started: Option<f64>) {
    let closure = Closure::once(move |timestamp: f64| {
        let t0 = started.unwrap_or(timestamp);
        let progress = ((timestamp - t0) / duration_ms).min(1.0);
        let value = (progress * (end - start) + start).floor() as i64;
        el.set_text_content(Some(&value.to_string()));
        if progress < 1.0 {
            schedule_count(el, start, end, duration_ms, Some(t0));
        }
    });
    let window = web_sys::window().expect("no window");
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Build the dashboard, wire its buttons and render the first refresh
pub fn init(document: &Document, seed: u64) -> Rc<RefCell<Dashboard>> {
    let dashboard = Rc::new(RefCell::new(Dashboard::new(seed)));

    // Segmented raid filter buttons
    if let Ok(buttons) = document.query_selector_all(".seg__btn") {
        for i in 0..buttons.length() {
            let Some(btn) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let key = btn.get_attribute("data-filter").unwrap_or_default();
            let dashboard = dashboard.clone();
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                if let Ok(all) = document.query_selector_all(".seg__btn") {
                    for j in 0..all.length() {
                        if let Some(other) = all.get(j).and_then(|n| n.dyn_into::<Element>().ok()) {
                            other.class_list().remove_1("is-active").ok();
                        }
                    }
                }
                btn_clone.class_list().add_1("is-active").ok();
                dashboard
                    .borrow_mut()
                    .set_filter(RaidFilter::from_key(&key), &document);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    // Refresh-all button
    if let Some(btn) = document.get_element_by_id("btnRefreshAll") {
        let dashboard = dashboard.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let document = web_sys::window().unwrap().document().unwrap();
            dashboard.borrow_mut().refresh_all(&document);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Refresh-raids button
    if let Some(btn) = document.get_element_by_id("btnRefreshRaids") {
        let dashboard = dashboard.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let document = web_sys::window().unwrap().document().unwrap();
            dashboard.borrow_mut().refresh_raids(&document);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    dashboard.borrow_mut().refresh_all(document);
    dashboard
}
