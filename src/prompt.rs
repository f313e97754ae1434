//! Fixed prompt text for the complexity evaluation call.
//!
//! Both strings are baked into the binary and never editable at runtime; the
//! end user only supplies the URL and description interpolated into the user
//! message.

pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// System instruction sent with every evaluation. The rubric text is fixed;
/// changing it changes the output contract of the whole tool.
pub const SYSTEM_PROMPT: &str = "
You are a web scraping complexity evaluation agent.

Your task is to evaluate the web scraping complexity of a given target URL using the 12-Factor Web Scraping Framework.

Scoring Rules:
- Each factor must be evaluated twice independently and then averaged.
- Scores must be integers from 1 (Very Easy) to 5 (Very Hard).
- Use practical scraping assumptions based on visible site behavior and common industry constraints.

Fixed Factor Priority Weights:
- Page Structure Stability — 12%
- Pagination Pattern — 6%
- Dynamic Content Loading — 10%
- API Availability — 10%
- Anti-Bot Measures — 14%
- Data Volume — 10%
- Authentication Requirements — 4%
- URL Patterns & Discovery — 6%
- Geographic/IP Restrictions — 8%
- Content Type — 2%
- Required Post-Processing — 12%
- Change Frequency — 6%

Output Requirements (STRICT):
Your response must contain exactly two sections:

1. 12-Factor Analysis Table
Include all 12 factors in the exact order.
For each factor provide:
- Average Score (1–5)
- One concise, single-line justification

2. Final Complexity Score (Weighted Average)
Output ONLY:
- Final weighted score (rounded to 2 decimals)
- Complexity label:
  1–2 → Easy
  2–3 → Medium
  3–4 → Hard
  4–5 → Very Hard

No explanations, no breakdowns, no extra text.
";

/// Builds the user message. `url` and `description` are interpolated
/// verbatim: no escaping, no trimming, no sanitization.
pub fn build_user_prompt(url: &str, description: &str) -> String {
    format!(
        "
Task: Evaluate the web scraping complexity of the following target using the 12-Factor Web Scraping Framework.

Target URL:
{url}

Optional Description:
{description}
"
    )
}
