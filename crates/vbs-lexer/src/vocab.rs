//! Closed VBScript vocabularies and their canonical spellings.
//!
//! Every lookup is case-insensitive and returns the canonical spelling, so
//! `IF`, `if` and `If` all come back as `If`.

use crate::token::TokenKind;

macro_rules! statements {
    ($($variant:ident => $text:literal),* $(,)?) => {
        /// Reserved statement words.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Stmt {
            $($variant),*
        }

        impl Stmt {
            pub const ALL: &'static [Stmt] = &[$(Stmt::$variant),*];

            /// Canonical spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Stmt::$variant => $text),*
                }
            }
        }
    };
}

statements! {
    ByRef => "ByRef",
    ByVal => "ByVal",
    Call => "Call",
    Case => "Case",
    Class => "Class",
    Const => "Const",
    Default => "Default",
    Dim => "Dim",
    Do => "Do",
    Each => "Each",
    Else => "Else",
    ElseIf => "ElseIf",
    End => "End",
    Erase => "Erase",
    Error => "Error",
    Execute => "Execute",
    ExecuteGlobal => "ExecuteGlobal",
    Exit => "Exit",
    Explicit => "Explicit",
    For => "For",
    Function => "Function",
    Get => "Get",
    GoTo => "GoTo",
    If => "If",
    In => "In",
    Let => "Let",
    Loop => "Loop",
    New => "New",
    Next => "Next",
    On => "On",
    Option => "Option",
    Preserve => "Preserve",
    Private => "Private",
    Property => "Property",
    Public => "Public",
    Raise => "Raise",
    Randomize => "Randomize",
    ReDim => "ReDim",
    Rem => "Rem",
    Resume => "Resume",
    Select => "Select",
    Set => "Set",
    Step => "Step",
    Stop => "Stop",
    Sub => "Sub",
    Then => "Then",
    To => "To",
    Until => "Until",
    Wend => "Wend",
    While => "While",
    With => "With",
}

impl Stmt {
    pub fn lookup(word: &str) -> Option<Stmt> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(word))
    }
}

/// Builtin functions, in canonical spelling.
pub const FUNCTIONS: &[&str] = &[
    "Abs", "Array", "Asc", "Atn", "CBool", "CByte", "CCur", "CDate", "CDbl", "Chr", "CInt",
    "CLng", "Cos", "CreateObject", "CSng", "CStr", "Date", "DateAdd", "DateDiff", "DatePart",
    "DateSerial", "DateValue", "Day", "Escape", "Eval", "Exp", "Filter", "Fix",
    "FormatCurrency", "FormatDateTime", "FormatNumber", "FormatPercent", "GetLocale",
    "GetObject", "GetRef", "Hex", "Hour", "InputBox", "InStr", "InStrRev", "Int", "IsArray",
    "IsDate", "IsEmpty", "IsNull", "IsNumeric", "IsObject", "Join", "LBound", "LCase", "Left",
    "Len", "LoadPicture", "Log", "LTrim", "Mid", "Minute", "Month", "MonthName", "MsgBox",
    "Now", "Oct", "Replace", "RGB", "Right", "Rnd", "Round", "RTrim", "ScriptEngine",
    "ScriptEngineBuildVersion", "ScriptEngineMajorVersion", "ScriptEngineMinorVersion",
    "Second", "SetLocale", "Sgn", "Sin", "Space", "Split", "Sqr", "StrComp", "String",
    "StrReverse", "Tan", "Time", "Timer", "TimeSerial", "TimeValue", "Trim", "TypeName",
    "UBound", "UCase", "UnEscape", "VarType", "WeekDay", "WeekDayName", "Year",
];

/// `Null`, `Empty`, `Nothing`.
pub const KEYWORDS: &[&str] = &["Null", "Empty", "Nothing"];

/// Operators, in canonical spelling.
pub const OPERATORS: &[&str] = &[
    "^", "*", "/", "\\", "\\\\", "+", "-", "&", "=", "<>", "<=", ">=", "<", ">", "Mod", "And",
    "Not", "Or", "Xor", "Eqv", "Imp", "Is",
];

/// The named-constant families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantFamily {
    Color,
    Compare,
    Date,
    DateFormat,
    Misc,
    MsgBox,
    String,
    Tristate,
    VarType,
}

impl ConstantFamily {
    pub const ALL: &'static [ConstantFamily] = &[
        ConstantFamily::Color,
        ConstantFamily::Compare,
        ConstantFamily::Date,
        ConstantFamily::DateFormat,
        ConstantFamily::Misc,
        ConstantFamily::MsgBox,
        ConstantFamily::String,
        ConstantFamily::Tristate,
        ConstantFamily::VarType,
    ];

    /// Members of the family, in canonical spelling.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            ConstantFamily::Color => &[
                "vbBlack", "vbRed", "vbGreen", "vbYellow", "vbBlue", "vbMagenta", "vbCyan",
                "vbWhite",
            ],
            ConstantFamily::Compare => &["vbBinaryCompare", "vbTextCompare", "vbDatabaseCompare"],
            ConstantFamily::Date => &[
                "vbSunday",
                "vbMonday",
                "vbTuesday",
                "vbWednesday",
                "vbThursday",
                "vbFriday",
                "vbSaturday",
                "vbUseSystemDayOfWeek",
                "vbFirstJan1",
                "vbFirstFourDays",
                "vbFirstFullWeek",
            ],
            ConstantFamily::DateFormat => &[
                "vbGeneralDate",
                "vbLongDate",
                "vbShortDate",
                "vbLongTime",
                "vbShortTime",
            ],
            ConstantFamily::Misc => &["vbObjectError"],
            ConstantFamily::MsgBox => &[
                "vbOKOnly",
                "vbOKCancel",
                "vbAbortRetryIgnore",
                "vbYesNoCancel",
                "vbYesNo",
                "vbRetryCancel",
                "vbCritical",
                "vbQuestion",
                "vbExclamation",
                "vbInformation",
                "vbDefaultButton1",
                "vbDefaultButton2",
                "vbDefaultButton3",
                "vbDefaultButton4",
                "vbApplicationModal",
                "vbSystemModal",
                "vbOK",
                "vbCancel",
                "vbAbort",
                "vbRetry",
                "vbIgnore",
                "vbYes",
                "vbNo",
            ],
            ConstantFamily::String => &[
                "vbCr",
                "vbCrLf",
                "vbFormFeed",
                "vbLf",
                "vbNewLine",
                "vbNullChar",
                "vbNullString",
                "vbTab",
                "vbVerticalTab",
            ],
            ConstantFamily::Tristate => &["vbUseDefault", "vbTrue", "vbFalse"],
            ConstantFamily::VarType => &[
                "vbEmpty",
                "vbNull",
                "vbInteger",
                "vbLong",
                "vbSingle",
                "vbDouble",
                "vbCurrency",
                "vbDate",
                "vbString",
                "vbObject",
                "vbError",
                "vbBoolean",
                "vbVariant",
                "vbDataObject",
                "vbDecimal",
                "vbByte",
                "vbArray",
            ],
        }
    }

    /// Find `word` in any family.
    pub fn lookup(word: &str) -> Option<(ConstantFamily, &'static str)> {
        Self::ALL
            .iter()
            .find_map(|family| find(family.names(), word).map(|name| (*family, name)))
    }
}

/// Classify an identifier. Priority: statements, functions, keywords,
/// booleans, constants; anything else stays an identifier in its own case.
pub fn classify(word: &str) -> TokenKind {
    if let Some(stmt) = Stmt::lookup(word) {
        TokenKind::Statement(stmt)
    } else if let Some(name) = find(FUNCTIONS, word) {
        TokenKind::Function(name)
    } else if let Some(name) = find(KEYWORDS, word) {
        TokenKind::Keyword(name)
    } else if word.eq_ignore_ascii_case("true") {
        TokenKind::Boolean(true)
    } else if word.eq_ignore_ascii_case("false") {
        TokenKind::Boolean(false)
    } else if let Some((family, name)) = ConstantFamily::lookup(word) {
        TokenKind::Constant(family, name)
    } else {
        TokenKind::Identifier(word.to_string())
    }
}

/// Canonical spelling of an operator, `None` for text the scanner should
/// never have produced.
pub fn canonical_operator(text: &str) -> Option<&'static str> {
    find(OPERATORS, text)
}

fn find(table: &[&'static str], word: &str) -> Option<&'static str> {
    table.iter().copied().find(|name| name.eq_ignore_ascii_case(word))
}
