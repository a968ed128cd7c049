//! Instruction text sent to the model for a single analysis.

/// Build the analysis prompt for `subject`.
///
/// The subject is inserted verbatim; callers reject blank subjects before getting here.
pub fn build_analysis_prompt(subject: &str) -> String {
    format!(
        r#"Act as a senior professional crypto trader and financial analyst with 20 years of experience.
Your task is to analyze the cryptocurrency "{subject}".

1. Use Google Search to find the latest real-time price, recent news, market sentiment, and any major upcoming events (forks, regulation, tech upgrades).
2. Perform a deep technical analysis (patterns like Head & Shoulders, wedges, RSI, MACD, Elliott Wave) and fundamental analysis (tokenomics, team, utility).
3. Consider macro-economic factors (inflation, interest rates, political climate).
4. Predict the price trend for the next 3-4 months.
5. Determine the optimal trading setup (Entry, Take Profit, Stop Loss).

CRITICAL OUTPUT RULES (TO PREVENT JSON ERRORS):
- Return ONLY a valid JSON object.
- Do NOT include any markdown formatting (like ```json) or conversational text.
- Inside any string values (especially "detailedAnalysis" and "summary"), YOU MUST USE SINGLE QUOTES (') for any quotes or emphasis.
- NEVER use double quotes (") inside a string value, as this breaks the JSON structure.
- Use literal \n for newlines inside strings. Do not use real line breaks inside strings.
- Ensure all property names are enclosed in double quotes.

JSON Schema:
{{
  "coin": "{subject}",
  "currentPrice": "string (e.g., '$1.23' or '$65,000')",
  "verdict": "BUY" | "SELL" | "HOLD" | "WAIT",
  "confidenceScore": number (0-100),
  "riskLevel": "LOW" | "MEDIUM" | "HIGH" | "EXTREME",
  "summary": "string (Short executive summary. Use single quotes for text inside.)",
  "detailedAnalysis": "string (Comprehensive analysis in Markdown. Use \n for line breaks. Use single quotes for text inside.)",
  "keyFactors": ["string", "string", "string"],
  "entryPrice": "string (e.g., '$1.20 - $1.25')",
  "takeProfit": "string (e.g., '$1.50')",
  "stopLoss": "string (e.g., '$1.10')",
  "predictedTrend": [
    {{ "label": "Current", "price": number (numeric value only) }},
    {{ "label": "Month 1", "price": number }},
    {{ "label": "Month 2", "price": number }},
    {{ "label": "Month 3", "price": number }}
  ]
}}"#
    )
}
