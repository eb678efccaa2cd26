//! Canned product-analysis prompts.
//!
//! The browser extension renders six cards per product; each card maps to
//! one aspect here, with the JSON shape its renderer expects. The shapes
//! are part of the extension contract — change them and the popup breaks.

pub struct AnalysisAspect {
    /// Key the aspect is reported under in the analyze response.
    pub key: &'static str,
    pub query: &'static str,
    /// Output contract passed to the answer generator verbatim.
    pub contract: &'static str,
}

pub const ANALYSIS_ASPECTS: &[AnalysisAspect] = &[
    AnalysisAspect {
        key: "food_preference",
        query: "Analyze the food product and determine if it's vegetarian, \
                non-vegetarian, or contains eggs. Provide a clear classification.",
        contract: r#"Return JSON in this exact format:
{
  "category": "veg|non-veg|egg",
  "description": "Brief explanation of why this classification was chosen",
  "confidence": "high|medium|low"
}"#,
    },
    AnalysisAspect {
        key: "health_grade",
        query: "Grade this food product's healthiness from A (excellent) to E \
                (poor) based on ingredients, nutritional value, processing \
                level, and overall health impact.",
        contract: r#"Return JSON in this exact format:
{
  "grade": "A|B|C|D|E",
  "title": "Short title like 'Excellent Choice' or 'Poor Quality'",
  "description": "2-3 sentence explanation of why this grade was given",
  "factors": ["factor1", "factor2", "factor3"]
}"#,
    },
    AnalysisAspect {
        key: "risk_assessment",
        query: "Assess the health risk level of this product for the user \
                considering their allergies and health profile. Rate from \
                1-100 where 1 is lowest risk and 100 is highest risk.",
        contract: r#"Return JSON in this exact format:
{
  "riskScore": 25,
  "riskLevel": "low|medium|high",
  "description": "Brief explanation of the risk factors",
  "primaryConcerns": ["concern1", "concern2"]
}"#,
    },
    AnalysisAspect {
        key: "allergens",
        query: "Identify potential allergens in this product that match the \
                user's allergy profile. Provide specific warnings and \
                severity levels.",
        contract: r#"Return JSON in this exact format:
{
  "hasAllergens": true,
  "alerts": [
    {
      "allergen": "allergen name",
      "severity": "high|medium|low",
      "description": "Specific warning message",
      "icon": "⚠️|🚨|⚡"
    }
  ]
}"#,
    },
    AnalysisAspect {
        key: "nutrition_facts",
        query: "Extract and calculate nutritional information per serving \
                including calories, protein, fat, carbohydrates, fiber, \
                sugar, sodium, etc. Provide accurate values.",
        contract: r#"Return JSON in this exact format:
{
  "servingSize": "100g",
  "nutrients": {
    "calories": 250,
    "protein": "12g",
    "fat": "8g",
    "carbohydrates": "35g",
    "fiber": "3g",
    "sugar": "5g",
    "sodium": "450mg"
  }
}"#,
    },
    AnalysisAspect {
        key: "nutritional_breakdown",
        query: "Provide percentage breakdown of macronutrients (protein, fat, \
                carbs) and key micronutrients for visual chart representation.",
        contract: r#"Return JSON in this exact format:
{
  "macronutrients": {
    "protein": { "percentage": 25, "amount": "12g" },
    "fat": { "percentage": 30, "amount": "8g" },
    "carbohydrates": { "percentage": 45, "amount": "35g" }
  },
  "micronutrients": {
    "fiber": { "percentage": 15, "amount": "3g" },
    "sodium": { "percentage": 85, "amount": "450mg" }
  }
}"#,
    },
];
