#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame orchestration and session bookkeeping for Trophy Chase.
//!
//! A [`Session`] owns the authoritative world together with the controller
//! and pursuit systems and runs one fixed sequence per frame: steer the
//! player, tick the clock, step every free pursuer, and resolve contacts.
//! The events of each frame are folded into polled flags, the lives and score
//! counters, and the session outcome.

use std::time::Duration;

use tracing::{debug, info};
use trophy_chase_core::{Command, Event, LevelSettings};
use trophy_chase_system_controller::{Controller, HeldKeys};
use trophy_chase_system_pursuit::Pursuit;
use trophy_chase_world::{self as world, query, World};

/// Bookkeeping rules applied on top of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionRules {
    /// Lives available when the session starts.
    pub lives: u32,
    /// Score awarded for every collected bonus.
    pub bonus_score: u32,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            lives: 3,
            bonus_score: 50,
        }
    }
}

/// State of a session as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Frames are still being simulated.
    Playing,
    /// Every bonus was collected.
    Won,
    /// The player ran out of lives.
    Lost,
}

/// Flags and events produced by a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// A bonus was collected during the frame.
    pub bonus_just_collected: bool,
    /// A pursuer hit the player during the frame.
    pub player_just_hit: bool,
    /// No uncollected bonus remains.
    pub all_bonuses_collected: bool,
    /// Every event the world emitted during the frame, in order.
    pub events: Vec<Event>,
}

/// Owns the world and runs the per-frame sequence.
#[derive(Debug)]
pub struct Session {
    world: World,
    controller: Controller,
    pursuit: Pursuit,
    rules: SessionRules,
    lives: u32,
    score: u32,
    outcome: Outcome,
}

impl Session {
    /// Loads the provided layout and starts a new session.
    #[must_use]
    pub fn new(layout: &str, settings: LevelSettings, rules: SessionRules) -> Self {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::LoadLevel {
                layout: layout.to_owned(),
                settings,
            },
            &mut events,
        );
        debug!(?events, lives = rules.lives, "session started");

        Self {
            world,
            controller: Controller,
            pursuit: Pursuit,
            rules,
            lives: rules.lives,
            score: 0,
            outcome: Outcome::Playing,
        }
    }

    /// Runs one frame with the keys held during it.
    ///
    /// Frames submitted after the outcome is decided are ignored. Their report
    /// carries no events and only the polled win flag.
    pub fn advance(&mut self, dt: Duration, keys: HeldKeys) -> FrameReport {
        if self.outcome != Outcome::Playing {
            return FrameReport {
                all_bonuses_collected: query::all_bonuses_collected(&self.world),
                ..FrameReport::default()
            };
        }

        let mut events = Vec::new();

        let mut commands = Vec::new();
        self.controller.handle(keys, &mut commands);
        self.apply_all(commands, &mut events);

        let mut tick_events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut tick_events);

        let mut commands = Vec::new();
        self.pursuit.handle(
            &tick_events,
            &query::pursuer_view(&self.world),
            &query::collision(&self.world),
            &mut commands,
        );
        events.append(&mut tick_events);
        self.apply_all(commands, &mut events);

        world::apply(&mut self.world, Command::ResolveContacts, &mut events);

        self.settle(events)
    }

    fn apply_all(&mut self, commands: Vec<Command>, events: &mut Vec<Event>) {
        for command in commands {
            world::apply(&mut self.world, command, events);
        }
    }

    fn settle(&mut self, events: Vec<Event>) -> FrameReport {
        let mut report = FrameReport {
            all_bonuses_collected: query::all_bonuses_collected(&self.world),
            ..FrameReport::default()
        };

        for event in &events {
            match event {
                Event::BonusCollected { .. } => {
                    report.bonus_just_collected = true;
                    self.score = self.score.saturating_add(self.rules.bonus_score);
                }
                Event::PlayerHit { .. } => {
                    report.player_just_hit = true;
                    self.lives = self.lives.saturating_sub(1);
                }
                _ => {}
            }
        }

        if self.lives == 0 {
            self.outcome = Outcome::Lost;
            info!(score = self.score, "session lost");
        } else if report.all_bonuses_collected {
            self.outcome = Outcome::Won;
            info!(score = self.score, lives = self.lives, "session won");
        }

        report.events = events;
        report
    }

    /// World driven by the session.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Lives left.
    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Score accumulated so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current outcome.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}
