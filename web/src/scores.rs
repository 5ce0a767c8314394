use minado_core as game;
use yew::prelude::*;

/// One finished game worth remembering. The list lives in memory only and is
/// discarded on page reload.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HighScore {
    pub name: String,
    pub seconds: u32,
    pub config: game::GameConfig,
}

pub(crate) const MAX_SCORES: usize = 10;

/// Inserts keeping the list sorted fastest-first and bounded. Ties go behind
/// existing entries, so earlier wins keep their rank.
pub(crate) fn record(scores: &mut Vec<HighScore>, score: HighScore) {
    let pos = scores.partition_point(|existing| existing.seconds <= score.seconds);
    scores.insert(pos, score);
    scores.truncate(MAX_SCORES);
}

#[derive(Properties, PartialEq)]
pub(crate) struct ScoresProps {
    #[prop_or_default]
    pub open: bool,
    pub scores: Vec<HighScore>,
    pub submitted: bool,
    pub on_name_input: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component]
pub(crate) fn HighScoresView(props: &ScoresProps) -> Html {
    let on_name_input = props.on_name_input.clone();
    let oninput = Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        on_name_input.emit(input.value());
    });
    let on_submit = props.on_submit.clone();
    let on_close = props.on_close.clone();

    html! {
        <dialog class="high-scores" open={props.open}>
            <article>
                <h2>{"High scores"}</h2>
                <ol>
                    {
                        for props.scores.iter().map(|score| html! {
                            <li>
                                {format!(
                                    "{} — {}s ({}x{}, {} mines)",
                                    score.name,
                                    score.seconds,
                                    score.config.rows,
                                    score.config.cols,
                                    score.config.mines,
                                )}
                            </li>
                        })
                    }
                </ol>
                if !props.submitted {
                    <>
                        <input
                            name="score-name"
                            placeholder="your name"
                            {oninput}
                        />
                        <button onclick={Callback::from(move |_| on_submit.emit(()))}>
                            {"Save score"}
                        </button>
                    </>
                }
                <footer>
                    <button onclick={Callback::from(move |_| on_close.emit(()))}>
                        {"Close"}
                    </button>
                </footer>
            </article>
        </dialog>
    }
}
