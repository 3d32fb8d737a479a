use crate::border::Border;
use crate::dimension::Insets;
use crate::style::Style;
use crate::text::TextAlign;
use folio_types::Color;

/// The closed set of styles every assembled document can rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinStyle {
    Title,
    CompanyHeader,
    Heading,
    KeyLabel,
    KeyValue,
    ColumnHeader,
    Detail,
    DetailNumeric,
    GroupHeader,
    Summary,
    PageFooter,
    TocEntry,
    BudgetSection,
    BudgetChapter,
    BudgetParagraph,
}

impl BuiltinStyle {
    pub const ALL: [BuiltinStyle; 15] = [
        BuiltinStyle::Title,
        BuiltinStyle::CompanyHeader,
        BuiltinStyle::Heading,
        BuiltinStyle::KeyLabel,
        BuiltinStyle::KeyValue,
        BuiltinStyle::ColumnHeader,
        BuiltinStyle::Detail,
        BuiltinStyle::DetailNumeric,
        BuiltinStyle::GroupHeader,
        BuiltinStyle::Summary,
        BuiltinStyle::PageFooter,
        BuiltinStyle::TocEntry,
        BuiltinStyle::BudgetSection,
        BuiltinStyle::BudgetChapter,
        BuiltinStyle::BudgetParagraph,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinStyle::Title => "title",
            BuiltinStyle::CompanyHeader => "company-header",
            BuiltinStyle::Heading => "heading",
            BuiltinStyle::KeyLabel => "key-label",
            BuiltinStyle::KeyValue => "key-value",
            BuiltinStyle::ColumnHeader => "column-header",
            BuiltinStyle::Detail => "detail",
            BuiltinStyle::DetailNumeric => "detail-numeric",
            BuiltinStyle::GroupHeader => "group-header",
            BuiltinStyle::Summary => "summary",
            BuiltinStyle::PageFooter => "page-footer",
            BuiltinStyle::TocEntry => "toc-entry",
            BuiltinStyle::BudgetSection => "budget-section",
            BuiltinStyle::BudgetChapter => "budget-chapter",
            BuiltinStyle::BudgetParagraph => "budget-paragraph",
        }
    }

    pub fn default_style(self) -> Style {
        let base = Style::new(self.name());
        let rule = Border::thin(Color::gray(160));
        match self {
            BuiltinStyle::Title => base.with_font_size(18.0).bold().with_text_align(TextAlign::Center),
            BuiltinStyle::CompanyHeader => base.with_font_size(9.0).with_color(Color::gray(64)),
            BuiltinStyle::Heading => base.with_font_size(12.0).bold(),
            BuiltinStyle::KeyLabel => base.bold(),
            BuiltinStyle::KeyValue => base,
            BuiltinStyle::ColumnHeader => base
                .bold()
                .with_background(Color::gray(220))
                .with_border(rule),
            BuiltinStyle::Detail => base.with_border(rule),
            BuiltinStyle::DetailNumeric => base.with_border(rule).with_text_align(TextAlign::Right),
            BuiltinStyle::GroupHeader => base.bold().with_background(Color::gray(235)),
            BuiltinStyle::Summary => base.bold().with_text_align(TextAlign::Right),
            BuiltinStyle::PageFooter => base.with_font_size(8.0).with_color(Color::gray(96)),
            BuiltinStyle::TocEntry => base.with_padding(Insets::x(4)),
            BuiltinStyle::BudgetSection => base.bold().with_background(Color::gray(210)),
            BuiltinStyle::BudgetChapter => base.bold(),
            BuiltinStyle::BudgetParagraph => base,
        }
    }
}
