use rust_fsm::*;

state_machine! {
    screen_flow(Hero)

    Hero(HydrateProfileGenerate) => ProfileGenerate,
    Hero(HydrateProfileValidate) => ProfileValidate,
    Hero(HydrateValidator) => Validator,
    Hero(HydrateLoading) => Loading,
    Hero(HydrateResults) => Results,
    Hero(HydrateBuilder) => Builder,

    Hero(ChooseGenerate) => ProfileGenerate,
    Hero(ChooseValidate) => ProfileValidate,

    ProfileGenerate(SubmitProfile) => Loading,
    ProfileGenerate(Back) => Hero,

    ProfileValidate(SubmitProfile) => Validator,
    ProfileValidate(Back) => Hero,

    Validator(SubmitIdea) => Loading,
    Validator(Back) => ProfileValidate,

    Loading(Loaded) => Results,
    Loading(FailedGenerate) => ProfileGenerate,
    Loading(FailedValidate) => Validator,

    Results(Regenerate) => Loading,
    Results(SelectIdea) => Builder,
    Results(BackToProfile) => ProfileGenerate,
    Results(BackToValidator) => Validator,

    Builder(Back) => Results
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Hero,
    ProfileGenerate,
    ProfileValidate,
    Validator,
    Loading,
    Results,
    Builder,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Hero => "hero",
            Screen::ProfileGenerate => "profile-generate",
            Screen::ProfileValidate => "profile-validate",
            Screen::Validator => "validator",
            Screen::Loading => "loading",
            Screen::Results => "results",
            Screen::Builder => "builder",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenInput {
    ChooseGenerate,
    ChooseValidate,
    SubmitProfile,
    SubmitIdea,
    Loaded,
    FailedGenerate,
    FailedValidate,
    Regenerate,
    SelectIdea,
    Back,
    BackToProfile,
    BackToValidator,
}

fn hydrate(machine: &mut screen_flow::StateMachine, screen: Screen) -> Result<(), ()> {
    let input = match screen {
        Screen::Hero => return Ok(()),
        Screen::ProfileGenerate => screen_flow::Input::HydrateProfileGenerate,
        Screen::ProfileValidate => screen_flow::Input::HydrateProfileValidate,
        Screen::Validator => screen_flow::Input::HydrateValidator,
        Screen::Loading => screen_flow::Input::HydrateLoading,
        Screen::Results => screen_flow::Input::HydrateResults,
        Screen::Builder => screen_flow::Input::HydrateBuilder,
    };
    machine.consume(&input).map_err(|_| ())?;
    Ok(())
}

fn screen_of(state: &screen_flow::State) -> Screen {
    match state {
        screen_flow::State::Hero => Screen::Hero,
        screen_flow::State::ProfileGenerate => Screen::ProfileGenerate,
        screen_flow::State::ProfileValidate => Screen::ProfileValidate,
        screen_flow::State::Validator => Screen::Validator,
        screen_flow::State::Loading => Screen::Loading,
        screen_flow::State::Results => Screen::Results,
        screen_flow::State::Builder => Screen::Builder,
    }
}

/// Next screen for `input`, or `None` when the move is not allowed.
pub fn transition(current: Screen, input: ScreenInput) -> Option<Screen> {
    let mut machine = screen_flow::StateMachine::new();
    hydrate(&mut machine, current).ok()?;

    let input = match input {
        ScreenInput::ChooseGenerate => screen_flow::Input::ChooseGenerate,
        ScreenInput::ChooseValidate => screen_flow::Input::ChooseValidate,
        ScreenInput::SubmitProfile => screen_flow::Input::SubmitProfile,
        ScreenInput::SubmitIdea => screen_flow::Input::SubmitIdea,
        ScreenInput::Loaded => screen_flow::Input::Loaded,
        ScreenInput::FailedGenerate => screen_flow::Input::FailedGenerate,
        ScreenInput::FailedValidate => screen_flow::Input::FailedValidate,
        ScreenInput::Regenerate => screen_flow::Input::Regenerate,
        ScreenInput::SelectIdea => screen_flow::Input::SelectIdea,
        ScreenInput::Back => screen_flow::Input::Back,
        ScreenInput::BackToProfile => screen_flow::Input::BackToProfile,
        ScreenInput::BackToValidator => screen_flow::Input::BackToValidator,
    };

    machine.consume(&input).ok()?;
    Some(screen_of(machine.state()))
}
