use crate::scores::{record, HighScore, HighScoresView};
use crate::utils::{js_random_seed, utc_now};
use chrono::prelude::*;
use gloo::timers::callback::Interval;
use minado_core as game;
use yew::prelude::*;

/// One sitting at the board: the engine plus the timing the engine itself
/// does not track.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: game::Game,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    fn new(seed: u64) -> Self {
        Self::from_engine(game::Game::new(seed))
    }

    fn from_engine(engine: game::Game) -> Self {
        Self {
            engine,
            started_at: None,
            ended_at: None,
        }
    }

    fn is_won(&self) -> bool {
        self.engine.game_won()
    }

    fn is_lost(&self) -> bool {
        self.engine.you_lost()
    }

    /// A flag on the last unflagged mine completes a win without the engine
    /// deactivating itself, so the session checks `game_won` too.
    fn is_finished(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn click(&mut self, coords: game::Coord2, is_flag: bool, now: DateTime<Utc>) {
        if self.is_finished() {
            return;
        }

        self.engine.handle_click(coords, is_flag);

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if self.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }

    fn reset(&mut self) -> bool {
        if self.engine.reset() {
            self.started_at = None;
            self.ended_at = None;
            true
        } else {
            false
        }
    }

    fn mines_left(&self) -> i32 {
        let flagged = self
            .engine
            .board()
            .iter()
            .filter(|cell| cell.flag)
            .count() as i32;
        i32::from(self.engine.config().mines) - flagged
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Clicked(game::Coord2, bool),
    RowsInput(String),
    ColsInput(String),
    MinesInput(String),
    Reset,
    Tick,
    NameInput(String),
    SubmitScore,
    CloseScores,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    cell: game::Cell,
    #[prop_or_default]
    lost: bool,
    callback: Callback<(game::Coord2, bool)>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        cell,
        lost,
        callback,
    } = props.clone();

    let mut class = classes!("col");
    if cell.flag {
        class.push("flag");
    }
    if cell.revealed() {
        class.push("revealed");
        if cell.mine {
            class.push(classes!("mine", "oops"));
        } else {
            class.push(format!("num-{}", cell.adjacent_mines));
        }
    } else if lost && cell.mine {
        class.push("mine");
    }

    let content = if cell.revealed() && cell.mine {
        "💥".to_string()
    } else if lost && cell.mine && !cell.flag {
        "💣".to_string()
    } else if cell.flag {
        "🚩".to_string()
    } else if cell.revealed() && cell.adjacent_mines > 0 {
        cell.adjacent_mines.to_string()
    } else {
        String::new()
    };

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| callback.emit(((row, col), false)))
    };
    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        callback.emit(((row, col), true));
    });

    html! {
        <div {class} {onclick} {oncontextmenu}>{content}</div>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: GameSession,
    scores: Vec<HighScore>,
    show_scores: bool,
    score_submitted: bool,
    pending_name: String,
    prev_time: u32,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::Tick))
    }

    fn input_callback(
        ctx: &Context<Self>,
        message: fn(String) -> Msg,
    ) -> Callback<InputEvent> {
        ctx.link().callback(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            message(input.value())
        })
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        Self {
            session: GameSession::new(seed),
            scores: Vec::new(),
            show_scores: false,
            score_submitted: false,
            pending_name: String::new(),
            prev_time: 0,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Clicked(coords, is_flag) => {
                let was_won = self.session.is_won();
                self.session.click(coords, is_flag, utc_now());

                if self.session.is_won() && !was_won {
                    log::debug!("game won, prompting for a high score");
                    self.show_scores = true;
                    self.score_submitted = false;
                }
                true
            }
            Msg::RowsInput(raw) => {
                self.session.engine.set_pending_rows(&raw);
                true
            }
            Msg::ColsInput(raw) => {
                self.session.engine.set_pending_cols(&raw);
                true
            }
            Msg::MinesInput(raw) => {
                self.session.engine.set_pending_mines(&raw);
                true
            }
            Msg::Reset => {
                if self.session.reset() {
                    self.show_scores = false;
                    self.score_submitted = false;
                    self.pending_name.clear();
                }
                true
            }
            Msg::Tick => {
                let time = self.session.elapsed_secs(utc_now());
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            Msg::NameInput(name) => {
                self.pending_name = name;
                false
            }
            Msg::SubmitScore => {
                let name = match self.pending_name.trim() {
                    "" => "anonymous".to_string(),
                    name => name.to_string(),
                };
                record(
                    &mut self.scores,
                    HighScore {
                        name,
                        seconds: self.session.elapsed_secs(utc_now()),
                        config: self.session.engine.config(),
                    },
                );
                self.score_submitted = true;
                true
            }
            Msg::CloseScores => {
                self.show_scores = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let engine = &self.session.engine;
        let (rows, cols) = engine.size();
        let lost = engine.you_lost();
        let errors = engine.errors();
        let pending = engine.pending();

        let mines_left = self.session.mines_left();
        let elapsed = self.session.elapsed_secs(utc_now());

        let on_rows = GameView::input_callback(ctx, Msg::RowsInput);
        let on_cols = GameView::input_callback(ctx, Msg::ColsInput);
        let on_mines = GameView::input_callback(ctx, Msg::MinesInput);
        let on_reset = ctx.link().callback(|_: MouseEvent| Msg::Reset);

        html! {
            <div class="minado">
                <nav>
                    <aside class="mines-left">{mines_left}</aside>
                    <aside class="timer">{elapsed}</aside>
                </nav>
                <div class="board">
                    {
                        for (0..rows).map(|row| html! {
                            <div class="row">
                                {
                                    for (0..cols).map(|col| {
                                        let cell = engine.cell_at((row, col));
                                        let callback = ctx.link().callback(
                                            |(coords, is_flag)| Msg::Clicked(coords, is_flag),
                                        );
                                        html! {
                                            <CellView {row} {col} {cell} {lost} {callback}/>
                                        }
                                    })
                                }
                            </div>
                        })
                    }
                </div>
                if lost {
                    <div class="you-lost-container">
                        {"You hit a mine. Game over!"}
                    </div>
                }
                if !errors.is_empty() {
                    <ul class="errors">
                        {
                            for errors.iter().map(|error| html! {
                                <li>{error.to_string()}</li>
                            })
                        }
                    </ul>
                }
                <div class="reset-container">
                    <label>
                        {"Rows"}
                        <input name="reset-rows" value={pending.rows.clone()} oninput={on_rows}/>
                    </label>
                    <label>
                        {"Columns"}
                        <input name="reset-cols" value={pending.cols.clone()} oninput={on_cols}/>
                    </label>
                    <label>
                        {"Mines"}
                        <input name="reset-mines" value={pending.mines.clone()} oninput={on_mines}/>
                    </label>
                    <button onclick={on_reset} disabled={!errors.is_empty()}>
                        {"Reset"}
                    </button>
                </div>
                <HighScoresView
                    open={self.show_scores}
                    scores={self.scores.clone()}
                    submitted={self.score_submitted}
                    on_name_input={ctx.link().callback(Msg::NameInput)}
                    on_submit={ctx.link().callback(|()| Msg::SubmitScore)}
                    on_close={ctx.link().callback(|()| Msg::CloseScores)}
                />
            </div>
        }
    }
}
