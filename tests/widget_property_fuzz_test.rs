use page_widgets::{Page, Result};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const WIDGET_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/widget_property_fuzz_test.txt";
const DEFAULT_WIDGET_PROPTEST_CASES: u32 = 128;
const STAR_COUNT: u32 = 5;
const SLIDE_COUNT: usize = 4;

fn widget_page_html() -> String {
    let stars = (1..=STAR_COUNT)
        .map(|value| format!(r#"<span class="star" data-value="{value}" id="star-{value}"></span>"#))
        .collect::<String>();
    let slides = (0..SLIDE_COUNT)
        .map(|idx| format!(r#"<div class="carousel-item" id="slide-{idx}"></div>"#))
        .collect::<String>();
    format!(
        r#"
        <nav class="nav-search"><input name="q" id="q"></nav>
        <div class="star-rating" id="stars">{stars}</div>
        <input type="hidden" name="rating" id="rating" value="">
        <div class="carousel">{slides}
          <button class="carousel-prev" id="prev"></button>
          <button class="carousel-next" id="next"></button>
        </div>
        "#
    )
}

#[derive(Clone, Debug)]
enum WidgetAction {
    HoverStar(u32),
    ClickStar(u32),
    LeaveRating,
    Next,
    Prev,
    Type(String),
    Wait(i64),
}

fn widget_proptest_cases() -> u32 {
    std::env::var("PAGE_WIDGETS_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_WIDGET_PROPTEST_CASES)
}

fn query_strategy() -> BoxedStrategy<String> {
    vec(prop_oneof![Just('a'), Just('z'), Just('é'), Just('🎮'), Just(' ')], 0..=4)
        .prop_map(|chars| chars.into_iter().collect())
        .boxed()
}

fn widget_action_strategy() -> BoxedStrategy<WidgetAction> {
    prop_oneof![
        3 => (1..=STAR_COUNT).prop_map(WidgetAction::HoverStar),
        2 => (1..=STAR_COUNT).prop_map(WidgetAction::ClickStar),
        2 => Just(WidgetAction::LeaveRating),
        2 => Just(WidgetAction::Next),
        2 => Just(WidgetAction::Prev),
        3 => query_strategy().prop_map(WidgetAction::Type),
        2 => (0i64..=600).prop_map(WidgetAction::Wait),
    ]
    .boxed()
}

/// Reference state tracked alongside the page.
#[derive(Debug, Default)]
struct Model {
    committed: u32,
    hovered: Option<u32>,
    slide: usize,
    pending_query: Option<(String, i64)>,
    delivered: Vec<String>,
    now: i64,
}

fn run_action(page: &mut Page, model: &mut Model, action: &WidgetAction) -> Result<()> {
    match action {
        WidgetAction::HoverStar(value) => {
            page.hover(&format!("#star-{value}"))?;
            model.hovered = Some(*value);
        }
        WidgetAction::ClickStar(value) => {
            let star = format!("#star-{value}");
            page.hover(&star)?;
            page.click(&star)?;
            model.committed = *value;
            model.hovered = Some(*value);
        }
        WidgetAction::LeaveRating => {
            page.leave("#stars")?;
            model.hovered = None;
        }
        WidgetAction::Next => {
            page.click("#next")?;
            model.slide = (model.slide + 1) % SLIDE_COUNT;
        }
        WidgetAction::Prev => {
            page.click("#prev")?;
            model.slide = (model.slide + SLIDE_COUNT - 1) % SLIDE_COUNT;
        }
        WidgetAction::Type(query) => {
            page.type_text("#q", query)?;
            model.pending_query = (query.encode_utf16().count() >= 2)
                .then(|| (query.clone(), model.now + 300));
        }
        WidgetAction::Wait(delta) => {
            page.advance_time(*delta)?;
            model.now += delta;
            if let Some((query, due)) = model.pending_query.take() {
                if due <= model.now {
                    model.delivered.push(query);
                } else {
                    model.pending_query = Some((query, due));
                }
            }
        }
    }
    Ok(())
}

fn painted_value(page: &Page) -> Result<u32> {
    let mut painted = 0;
    for value in 1..=STAR_COUNT {
        let star = page.select(&format!("#star-{value}"))?;
        if page.dom().class_contains(star, "is-active")? {
            assert_eq!(painted + 1, value, "active stars must form a prefix");
            painted = value;
        }
    }
    Ok(painted)
}

fn assert_widget_sequence_matches_model(actions: &[WidgetAction]) -> TestCaseResult {
    let fail = |err: page_widgets::Error| TestCaseError::fail(format!("{err:?}"));
    let mut page = Page::load(&widget_page_html()).map_err(fail)?;
    let mut model = Model::default();

    for (step, action) in actions.iter().enumerate() {
        run_action(&mut page, &mut model, action).map_err(fail)?;

        let painted = painted_value(&page).map_err(fail)?;
        let expected = model.hovered.unwrap_or(model.committed);
        prop_assert_eq!(
            painted, expected,
            "painted stars diverged at step {}: {:?}", step, action
        );
        prop_assert_eq!(page.rating_widgets()[0].selected(), model.committed);

        let active_slides = page
            .dom()
            .query_selector_all(".carousel-item.active")
            .map_err(fail)?;
        prop_assert_eq!(active_slides.len(), 1);
        prop_assert_eq!(page.carousels()[0].current(), model.slide);

        prop_assert!(
            page.pending_timers().len() <= 1,
            "at most one search notification may be pending"
        );
        let delivered = page.take_search_queries();
        let expected_delivered = std::mem::take(&mut model.delivered);
        prop_assert_eq!(delivered, expected_delivered);
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: widget_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(WIDGET_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn widget_action_sequences_match_reference_model(
        actions in vec(widget_action_strategy(), 1..=32)
    ) {
        assert_widget_sequence_matches_model(&actions)?;
    }
}
