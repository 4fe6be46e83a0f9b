#[cfg(test)]
mod tests;

/// Build the yes/no relevance prompt sent to the remote model
#[must_use]
pub fn build_relevance_prompt(content: &str, focus_areas: &[String]) -> String {
    format!(
        "You are helping someone stay focused on their goals.\n\
         Their focus areas are: {areas}\n\
         \n\
         They are about to view this content:\n\
         \"{content}\"\n\
         \n\
         Decide whether viewing it supports their focus areas. Consider:\n\
         1. Is it educational or informative?\n\
         2. Is it relevant to their focus areas or goals?\n\
         3. Is it likely to be a distraction?\n\
         \n\
         Answer with exactly one word: \"yes\" if it is relevant, \"no\" if it is not.",
        areas = focus_areas.join(", "),
        content = content.trim(),
    )
}

/// Interpret the model's reply.
///
/// Relevant only when the lower-cased text contains "yes" and does not
/// contain "no" anywhere (including inside other words). Anything ambiguous
/// counts as not relevant.
#[must_use]
pub fn parse_verdict(response: &str) -> bool {
    let text = response.trim().to_lowercase();
    text.contains("yes") && !text.contains("no")
}
