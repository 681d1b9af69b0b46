//! Table grammar coverage: row grouping, attribute blocks, cell re-parsing.

use super::tree_tests;
use crate::{
    builder::{bold, table, table_cell, table_row, text},
    CellKind,
};

tree_tests! {
    header_and_data_rows: "{|\n! a | b\n|-\n| c\n|}" => [
        table(vec![
            table_row(vec![table_cell(CellKind::Header, vec![text("b")])]),
            table_row(vec![table_cell(CellKind::Data, vec![text("c")])]),
        ]),
    ],
    attribute_block_discarded: "{|\n| style=\"text-align:right;\" | 12,333.00\n|}" => [
        table(vec![table_row(vec![table_cell(CellKind::Data, vec![text("12,333.00")])])]),
    ],
    template_does_not_split_attribute_block: "{|\n| {{pad|5px}} | v\n|}" => [
        table(vec![table_row(vec![table_cell(CellKind::Data, vec![text("v")])])]),
    ],
    junk_lines_skipped: "{|\nnot a cell\n| a\n|}" => [
        table(vec![table_row(vec![table_cell(CellKind::Data, vec![text("a")])])]),
    ],
    rows_and_columns: "{|\n|Orange\n|Apple\n|-\n|Bread\n|Pie\n|}" => [
        table(vec![
            table_row(vec![
                table_cell(CellKind::Data, vec![text("Orange")]),
                table_cell(CellKind::Data, vec![text("Apple")]),
            ]),
            table_row(vec![
                table_cell(CellKind::Data, vec![text("Bread")]),
                table_cell(CellKind::Data, vec![text("Pie")]),
            ]),
        ]),
    ],
    header_cells_keep_their_kind: "{|\n! A\n! B\n|-\n| c\n| d\n|}" => [
        table(vec![
            table_row(vec![
                table_cell(CellKind::Header, vec![text("A")]),
                table_cell(CellKind::Header, vec![text("B")]),
            ]),
            table_row(vec![
                table_cell(CellKind::Data, vec![text("c")]),
                table_cell(CellKind::Data, vec![text("d")]),
            ]),
        ]),
    ],
    empty_table: "{|\n|}" => [table(vec![])],
    formatted_cell_content: "{|\n! '''H'''\n|}" => [
        table(vec![table_row(vec![
            table_cell(CellKind::Header, vec![bold(vec![text("H")])]),
        ])]),
    ],
    pipes_survive_in_content: "{|\n| x | y | z\n|}" => [
        table(vec![table_row(vec![table_cell(CellKind::Data, vec![text("y | z")])])]),
    ],
    indented_cell_lines: "{|\n  | a\n|}" => [
        table(vec![table_row(vec![table_cell(CellKind::Data, vec![text("a")])])]),
    ],
    table_start_attributes_ignored: "{| class=\"wikitable\"\n| a\n|}" => [
        table(vec![table_row(vec![table_cell(CellKind::Data, vec![text("a")])])]),
    ],
}
