//! Interactive controller for human players
//!
//! Reads choices from stdin and shows the relevant game state through
//! GameStateView. Invalid input re-prompts; closing stdin ends the process.

use crate::core::{CardId, DrinkKind, NpcId, PlayerId};
use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use crate::game::DiscardReason;
use std::io::{self, Write};

/// A controller that prompts a human player for decisions via stdin
pub struct InteractiveController {
    player_id: PlayerId,
}

impl InteractiveController {
    pub fn new(player_id: PlayerId) -> Self {
        InteractiveController { player_id }
    }

    fn read_line(&self) -> String {
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                eprintln!("\nInput closed, leaving the party.");
                std::process::exit(1);
            }
            Ok(_) => input.trim().to_string(),
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                String::new()
            }
        }
    }

    /// Prompt until the user enters a valid index, or 'p' when passing is allowed
    fn get_user_choice(&self, prompt: &str, num_options: usize, allow_pass: bool) -> Option<usize> {
        loop {
            print!("{} ", prompt);
            let _ = io::stdout().flush();

            let input = self.read_line();
            if allow_pass && (input == "p" || input == "pass") {
                return None;
            }
            match input.parse::<usize>() {
                Ok(choice) if choice < num_options => return Some(choice),
                _ => {
                    eprintln!(
                        "Ugyldig valg. Skriv 0-{}{}.",
                        num_options.saturating_sub(1),
                        if allow_pass { " eller 'p'" } else { "" }
                    );
                }
            }
        }
    }

    /// Prompt for a required choice (no passing)
    fn require_choice(&self, prompt: &str, num_options: usize) -> usize {
        self.get_user_choice(prompt, num_options, false).unwrap_or(0)
    }

    fn display_cards(&self, view: &GameStateView, cards: &[CardId]) {
        for (idx, &card_id) in cards.iter().enumerate() {
            match view.card(card_id) {
                Some(card) => {
                    print!(
                        "  {}: {} ({:+} promille, {:+} minner)",
                        idx, card.name, card.intoxication_delta, card.memory_delta
                    );
                    if !card.text.is_empty() {
                        print!(" - {}", card.text);
                    }
                    println!();
                }
                None => println!("  {}: {}", idx, view.card_name(card_id)),
            }
        }
    }

    fn display_npcs(&self, view: &GameStateView, npcs: &[NpcId]) {
        for (idx, &npc_id) in npcs.iter().enumerate() {
            match view.npc(npc_id) {
                Some(npc) if !npc.text.is_empty() => println!("  {}: {} - {}", idx, npc.name, npc.text),
                _ => println!("  {}: {}", idx, view.npc_name(npc_id)),
            }
        }
    }

    fn display_status(&self, view: &GameStateView) {
        println!("\n=== Status ===");
        for p in view.players() {
            let pill = if p.has_pill { " (pilla)" } else { "" };
            println!(
                "  {:<12} {:>4.1} promille  {:>3} minner{}",
                p.name, p.intoxication, p.memory, pill
            );
        }
        let owned = view.owned_npcs();
        if !owned.is_empty() {
            println!("Dine venner:");
            self.display_npcs(view, &owned);
        }
        println!();
    }

    fn display_help(&self) {
        println!("\n=== Hjelp ===");
        println!("  <nr>  - spill kortet");
        println!("  b     - bytt to kort mot ett fra bunken");
        println!("  s     - send bort en venn (koster ett kort)");
        println!("  v     - vis stillingen");
        println!("  ?     - denne hjelpen");
        println!();
    }

    fn choose_trade(&self, view: &GameStateView, hand: &[CardId]) -> Option<TurnAction> {
        if hand.len() < 2 {
            eprintln!("Du trenger minst to kort for å bytte.");
            return None;
        }
        self.display_cards(view, hand);
        let first = self.get_user_choice("Første kort å kaste (p for å avbryte):", hand.len(), true)?;
        loop {
            let second =
                self.get_user_choice("Andre kort å kaste (p for å avbryte):", hand.len(), true)?;
            if second != first {
                return Some(TurnAction::TradeCards(hand[first], hand[second]));
            }
            eprintln!("Velg to forskjellige kort.");
        }
    }

    fn choose_send_away(&self, view: &GameStateView, hand: &[CardId]) -> Option<TurnAction> {
        let owned = view.owned_npcs();
        if owned.is_empty() {
            eprintln!("Du har ingen venner å sende bort.");
            return None;
        }
        self.display_npcs(view, &owned);
        let npc = self.get_user_choice("Hvem skal gå? (p for å avbryte):", owned.len(), true)?;
        self.display_cards(view, hand);
        let discard = self.get_user_choice("Kort å kaste (p for å avbryte):", hand.len(), true)?;
        Some(TurnAction::SendAwayFriend {
            discard: hand[discard],
            npc: owned[npc],
        })
    }
}

impl PlayerController for InteractiveController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_turn_action(&mut self, view: &GameStateView, hand: &[CardId]) -> TurnAction {
        let (intoxication, memory) = view.stats();
        loop {
            println!("\nDin tur ({:.1} promille, {} minner). Hånd:", intoxication, memory);
            self.display_cards(view, hand);
            print!("Velg kort 0-{} (b/s/v/?): ", hand.len().saturating_sub(1));
            let _ = io::stdout().flush();

            let input = self.read_line();
            let action = match input.as_str() {
                "?" => {
                    self.display_help();
                    None
                }
                "v" => {
                    self.display_status(view);
                    None
                }
                "b" => self.choose_trade(view, hand),
                "s" => self.choose_send_away(view, hand),
                other => match other.parse::<usize>() {
                    Ok(idx) if idx < hand.len() => Some(TurnAction::PlayCard(hand[idx])),
                    _ => {
                        eprintln!("Ugyldig valg.");
                        None
                    }
                },
            };
            if let Some(action) = action {
                return action;
            }
        }
    }

    fn choose_chug(&mut self, _view: &GameStateView) -> bool {
        loop {
            print!("Vil du chugge ølen? (j/n): ");
            let _ = io::stdout().flush();
            match self.read_line().to_lowercase().as_str() {
                "j" | "ja" | "y" => return true,
                "n" | "nei" => return false,
                _ => eprintln!("Svar j eller n."),
            }
        }
    }

    fn choose_drink(&mut self, _view: &GameStateView, options: &[DrinkKind]) -> DrinkKind {
        println!("Bong eller ikke bong?");
        for (idx, drink) in options.iter().enumerate() {
            println!("  {}: {}", idx, drink);
        }
        let idx = self.require_choice("Velg:", options.len());
        options.get(idx).copied().unwrap_or(DrinkKind::Beer)
    }

    fn choose_friend_to_call(&mut self, view: &GameStateView, town: &[NpcId]) -> Option<NpcId> {
        println!("Hvem vil du ringe?");
        self.display_npcs(view, town);
        self.get_user_choice("Velg venn (p for å legge på):", town.len(), true)
            .map(|idx| town[idx])
    }

    fn choose_card_to_discard(
        &mut self,
        view: &GameStateView,
        hand: &[CardId],
        reason: DiscardReason,
    ) -> CardId {
        let why = match reason {
            DiscardReason::Vomit => "Du spydde",
            DiscardReason::Dring => "Dring holder deg igjen",
            DiscardReason::SendAway => "Å sende bort en venn koster et kort",
            DiscardReason::Trade => "Bytte",
        };
        println!("{}. Velg et kort å kaste:", why);
        self.display_cards(view, hand);
        let idx = self.require_choice("Kort:", hand.len());
        hand[idx]
    }

    fn choose_trade_card(&mut self, view: &GameStateView, offered: &[CardId]) -> CardId {
        println!("Velg ett kort å beholde:");
        self.display_cards(view, offered);
        let idx = self.require_choice("Kort:", offered.len());
        offered[idx]
    }

    fn on_game_end(&mut self, view: &GameStateView, won: bool) {
        let (_, memory) = view.stats();
        if won {
            println!("Du vant med {} minner!", memory);
        } else {
            println!("Du endte med {} minner.", memory);
        }
    }
}
