// User-facing conversation texts.

pub const MAIN_MENU: &str =
    "Choose an action: search vacancies, analyze skills, or read about the bot.";

pub const SEARCH_PROMPT: &str =
    "Enter a query to search vacancies, or pick one of your recent queries.";

pub const ANALYZE_PROMPT: &str =
    "Enter a query to analyze the skills employers ask for, or pick one of your recent queries.";

pub const ABOUT: &str = "This bot searches vacancies on hh.ru and analyzes which key skills \
employers mention in them.";

pub const EMPTY_QUERY: &str = "Please enter a non-empty query.";

pub const UNRECOGNIZED: &str = "I did not understand that. Choose an action from the menu first.";

pub const ALREADY_PROCESSING: &str =
    "Your request is already being processed. Please wait for the current analysis to finish.";

pub const ANALYSIS_DONE: &str = "Analysis complete! Here are the results:";

pub const NO_VACANCIES: &str = "No vacancies found for your query.";

pub const SEARCH_UNAVAILABLE: &str =
    "The job search service is unavailable right now. Please try again later.";

pub const NO_SKILLS: &str = "Could not extract any skills from the analyzed vacancies.";
