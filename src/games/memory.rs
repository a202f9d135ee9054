//! Cosmic match: a memory game over pairs of space emoji.
//!
//! Grid states: idle (nothing face up) → one flipped → locked (two flipped).
//! A matching pair is resolved immediately; a mismatch stays locked until the
//! caller reports the delay elapsed via [`MemoryGame::resolve_mismatch`].
//! Every deal gets a new generation number so a resolution scheduled before a
//! reset cannot touch the new cards.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::SPACE_SYMBOLS;
use crate::config::MemoryConfig;
use crate::dom;
use crate::games::parse_data;
use crate::rng::GameRng;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryCard {
    pub symbol: &'static str,
    pub index: usize,
    pub flipped: bool,
    pub matched: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Locked grid, or card already face up / matched. Nothing changed.
    Rejected,
    /// First card of a pair turned over.
    Flipped(usize),
    Matched(usize, usize),
    /// Grid is now locked until `resolve_mismatch(deal, first, second)`.
    Mismatched { deal: u32, first: usize, second: usize },
}

#[derive(Debug, Default)]
pub struct MemoryGame {
    cards: Vec<MemoryCard>,
    flipped: Vec<usize>,
    locked: bool,
    deal: u32,
    moves: u32,
}

impl MemoryGame {
    /// Fresh deal: every symbol exactly twice, shuffled, all face down.
    pub fn deal(&mut self, symbols: &[&'static str], rng: &mut GameRng) {
        let mut deck: Vec<&'static str> = symbols.iter().chain(symbols.iter()).copied().collect();
        rng.shuffle(&mut deck);
        self.cards = deck
            .into_iter()
            .enumerate()
            .map(|(index, symbol)| MemoryCard { symbol, index, flipped: false, matched: false })
            .collect();
        self.flipped.clear();
        self.locked = false;
        self.moves = 0;
        self.deal = self.deal.wrapping_add(1);
    }

    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn deal_id(&self) -> u32 {
        self.deal
    }

    /// Completed pair attempts in this deal.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.locked {
            return FlipOutcome::Rejected;
        }
        match self.cards.get_mut(index) {
            Some(card) if !card.flipped && !card.matched => card.flipped = true,
            _ => return FlipOutcome::Rejected,
        }
        self.flipped.push(index);

        let &[first, second] = self.flipped.as_slice() else {
            return FlipOutcome::Flipped(index);
        };
        self.moves += 1;
        if self.cards[first].symbol == self.cards[second].symbol {
            self.cards[first].matched = true;
            self.cards[second].matched = true;
            self.flipped.clear();
            FlipOutcome::Matched(first, second)
        } else {
            self.locked = true;
            FlipOutcome::Mismatched { deal: self.deal, first, second }
        }
    }

    /// Turn a mismatched pair back over and unlock. Stale deals are ignored.
    pub fn resolve_mismatch(&mut self, deal: u32, first: usize, second: usize) -> bool {
        if deal != self.deal || !self.locked || self.flipped[..] != [first, second] {
            return false;
        }
        for i in [first, second] {
            self.cards[i].flipped = false;
        }
        self.flipped.clear();
        self.locked = false;
        true
    }
}

pub struct MemoryView {
    game: MemoryGame,
    grid: HtmlElement,
    card_els: Vec<HtmlElement>,
}

impl MemoryView {
    fn sync_card(&self, index: usize) {
        if let (Some(el), Some(card)) = (self.card_els.get(index), self.game.cards().get(index)) {
            dom::toggle_class(el, "flipped", card.flipped);
            dom::toggle_class(el, "matched", card.matched);
        }
    }
}

#[derive(Clone)]
pub struct MemoryHandle {
    view: Rc<RefCell<MemoryView>>,
    doc: Document,
    cfg: MemoryConfig,
    rng: Rc<RefCell<GameRng>>,
}

impl MemoryHandle {
    /// Shuffle and rebuild the grid.
    pub fn new_game(&self) -> Result<(), JsValue> {
        let mut view = self.view.borrow_mut();
        view.game.deal(SPACE_SYMBOLS, &mut self.rng.borrow_mut());
        view.grid.set_inner_html("");

        let mut els = Vec::with_capacity(view.game.cards().len());
        for card in view.game.cards() {
            let el = dom::create_div(&self.doc, Some("memory-card"))?;
            el.set_attribute("data-emoji", card.symbol)?;
            el.set_attribute("data-index", &card.index.to_string())?;
            el.set_inner_html(&format!(
                "<div class=\"card-front\">✨</div><div class=\"card-back\">{}</div>",
                card.symbol
            ));
            view.grid.append_child(&el)?;
            els.push(el);
        }
        view.card_els = els;
        log::info!("memory: new deal #{}", view.game.deal_id());
        Ok(())
    }

    /// Deals on the first activation only; later visits keep the board.
    pub fn on_activate(&self, first: bool) -> Result<(), JsValue> {
        if first { self.new_game() } else { Ok(()) }
    }

    fn on_card_click(&self, index: usize) {
        let mut view = self.view.borrow_mut();
        match view.game.flip(index) {
            FlipOutcome::Rejected => {}
            FlipOutcome::Flipped(i) => view.sync_card(i),
            FlipOutcome::Matched(a, b) => {
                view.sync_card(a);
                view.sync_card(b);
                if view.game.is_complete() {
                    log::info!("memory: all pairs found in {} moves", view.game.moves());
                }
            }
            FlipOutcome::Mismatched { deal, first, second } => {
                view.sync_card(second);
                let v = self.view.clone();
                dom::set_timeout(self.cfg.mismatch_delay_ms, move || {
                    let mut view = v.borrow_mut();
                    if view.game.resolve_mismatch(deal, first, second) {
                        view.sync_card(first);
                        view.sync_card(second);
                    }
                });
            }
        }
    }
}

pub fn install(
    doc: &Document,
    cfg: &MemoryConfig,
    rng: Rc<RefCell<GameRng>>,
) -> Result<Option<MemoryHandle>, JsValue> {
    let Some(grid) = dom::by_id::<HtmlElement>(doc, "memory-grid") else {
        return Ok(None);
    };
    let handle = MemoryHandle {
        view: Rc::new(RefCell::new(MemoryView {
            game: MemoryGame::default(),
            grid,
            card_els: Vec::new(),
        })),
        doc: doc.clone(),
        cfg: cfg.clone(),
        rng,
    };

    // Cards are rebuilt on every deal; the grid keeps the only click handler.
    {
        let h = handle.clone();
        let grid = h.view.borrow().grid.clone();
        dom::listen(&grid, "click", move |evt| {
            let index = dom::delegate_target(&evt, ".memory-card")
                .and_then(|card| parse_data::<usize>(card.get_attribute("data-index")));
            if let Some(index) = index {
                h.on_card_click(index);
            }
        })?;
    }

    if let Some(reset) = dom::by_id::<HtmlElement>(doc, "resetMemory") {
        let h = handle.clone();
        dom::listen(&reset, "click", move |_evt| {
            if let Err(e) = h.new_game() {
                log::warn!("memory reset failed: {e:?}");
            }
        })?;
    }
    Ok(Some(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dealt(seed: u64) -> MemoryGame {
        let mut g = MemoryGame::default();
        g.deal(SPACE_SYMBOLS, &mut GameRng::seeded(seed));
        g
    }

    /// Indices of two cards with the same symbol and of two with different ones.
    fn pair_and_mismatch(g: &MemoryGame) -> ((usize, usize), (usize, usize)) {
        let cards = g.cards();
        let a = cards[0].symbol;
        let twin = cards.iter().skip(1).position(|c| c.symbol == a).unwrap() + 1;
        let other = cards.iter().position(|c| c.symbol != a).unwrap();
        ((0, twin), (0, other))
    }

    #[test]
    fn deal_has_every_symbol_twice_face_down() {
        let g = dealt(1);
        assert_eq!(g.cards().len(), SPACE_SYMBOLS.len() * 2);
        for s in SPACE_SYMBOLS {
            assert_eq!(g.cards().iter().filter(|c| c.symbol == *s).count(), 2);
        }
        assert!(g.cards().iter().all(|c| !c.flipped && !c.matched));
        assert!(g.cards().iter().enumerate().all(|(i, c)| c.index == i));
    }

    #[test]
    fn matching_pair_stays_up() {
        let mut g = dealt(3);
        let ((a, b), _) = pair_and_mismatch(&g);
        assert_eq!(g.flip(a), FlipOutcome::Flipped(a));
        assert_eq!(g.flip(b), FlipOutcome::Matched(a, b));
        assert!(!g.is_locked());
        assert!(g.cards()[a].matched && g.cards()[a].flipped);
        assert_eq!(g.flip(a), FlipOutcome::Rejected);
        assert_eq!(g.flip(b), FlipOutcome::Rejected);
    }

    #[test]
    fn mismatch_locks_then_unflips() {
        let mut g = dealt(5);
        let (_, (a, b)) = pair_and_mismatch(&g);
        g.flip(a);
        let outcome = g.flip(b);
        let FlipOutcome::Mismatched { deal, first, second } = outcome else {
            panic!("expected mismatch, got {outcome:?}");
        };
        assert!(g.is_locked());

        let third = (0..g.cards().len()).find(|i| *i != a && *i != b).unwrap();
        let before = g.cards().to_vec();
        assert_eq!(g.flip(third), FlipOutcome::Rejected);
        assert_eq!(g.cards(), &before[..]);

        assert!(g.resolve_mismatch(deal, first, second));
        assert!(!g.is_locked());
        assert!(!g.cards()[a].flipped && !g.cards()[a].matched);
        assert!(!g.cards()[b].flipped && !g.cards()[b].matched);
        assert!(!g.resolve_mismatch(deal, first, second));
    }

    #[test]
    fn reset_discards_pending_resolution() {
        let mut g = dealt(7);
        let (_, (a, b)) = pair_and_mismatch(&g);
        g.flip(a);
        let FlipOutcome::Mismatched { deal, .. } = g.flip(b) else { panic!() };
        g.deal(SPACE_SYMBOLS, &mut GameRng::seeded(8));
        assert!(!g.is_locked());
        assert!(!g.resolve_mismatch(deal, a, b));
        assert!(g.cards().iter().all(|c| !c.flipped && !c.matched));
    }

    #[test]
    fn data_index_attribute_addresses_its_card() {
        let mut g = dealt(13);
        let attr = g.cards()[6].index.to_string();
        let index = parse_data::<usize>(Some(attr)).unwrap();
        assert_eq!(g.flip(index), FlipOutcome::Flipped(6));
        assert!(g.cards()[6].flipped);
        assert_eq!(g.cards().iter().filter(|c| c.flipped).count(), 1);
    }

    #[test]
    fn flipping_same_card_twice_is_rejected() {
        let mut g = dealt(9);
        g.flip(4);
        assert_eq!(g.flip(4), FlipOutcome::Rejected);
        assert_eq!(g.flip(99), FlipOutcome::Rejected);
    }

    #[test]
    fn solving_every_pair_completes() {
        let mut g = dealt(11);
        for s in SPACE_SYMBOLS {
            let idx: Vec<usize> =
                g.cards().iter().filter(|c| c.symbol == *s).map(|c| c.index).collect();
            g.flip(idx[0]);
            assert!(matches!(g.flip(idx[1]), FlipOutcome::Matched(..)));
        }
        assert!(g.is_complete());
        assert_eq!(g.moves(), SPACE_SYMBOLS.len() as u32);
    }
}
