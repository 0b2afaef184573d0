use crate::design::model::DesignConfig;
use crate::prompts::PromptConfig;

pub fn build_analysis_prompt(prompts: &PromptConfig) -> String {
    let analysis = &prompts.analysis_prompt;
    let fields = &analysis.fields;
    format!(
        "{role}\n\
CRITICAL: All field VALUES must be in CHINESE (Simplified).\n\
\n\
Return a pure JSON object (no markdown formatting) with the following fields:\n\
- designConcept: {design_concept}\n\
- style: {style}\n\
- audience: {audience}\n\
- emotionalPoint: {emotional_point}\n\
- scenario: {scenario}\n\
- corePoint: {core_point}\n\
\n\
Keep descriptions professional and concise.",
        role = analysis.system_role,
        design_concept = fields.design_concept,
        style = fields.style,
        audience = fields.audience,
        emotional_point = fields.emotional_point,
        scenario = fields.scenario,
        core_point = fields.core_point,
    )
}

pub fn build_generation_prompt(prompts: &PromptConfig, config: &DesignConfig) -> String {
    let generation = &prompts.generation_prompt;
    format!(
        "{role}\n\
{guidelines}\n\
\n\
If a reference image is provided, use it as the primary structural and aesthetic inspiration, but evolve it based on the new parameters (Derived Design).\n\
\n\
Design Specifications:\n\
- Material: {material}\n\
- Craftsmanship: {craftsmanship}\n\
- Chain/Structure Type: {chain_type}\n\
- Extra Decorative Elements: {extra_elements}\n\
- Target Audience/Occasion: {audience}\n\
- Creativity/Variation Level: {creativity}% (Where 0% is identical to reference, 100% is completely new).\n\
- Additional Instructions: {misc}\n\
\n\
Market Context (Use this to influence the style to be commercially viable):\n\
- Target Ranking Index: Top {min_ranking}\n\
- Min Sales Volume: {min_sales}+ units\n\
\n\
{requirements}\n\
\n\
Image Size: {resolution}\n\
Aspect Ratio: {aspect_ratio}",
        role = generation.system_role,
        guidelines = generation.product_specific_guidelines,
        material = config.material,
        craftsmanship = config.craftsmanship,
        chain_type = config.chain_type,
        extra_elements = config.extra_elements,
        audience = config.audience,
        creativity = config.creativity_strength,
        misc = config.misc_prompts,
        min_ranking = config.min_ranking,
        min_sales = config.min_sales,
        requirements = generation.output_requirements,
        resolution = config.resolution,
        aspect_ratio = config.aspect_ratio,
    )
}
