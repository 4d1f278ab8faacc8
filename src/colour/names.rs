//! SVG 1.1 named colours, sorted by name.

use super::Colour;

pub(crate) static NAMED: &[(&str, Colour)] = &[
    ("aliceblue", Colour::rgb(0xf0, 0xf8, 0xff)),
    ("antiquewhite", Colour::rgb(0xfa, 0xeb, 0xd7)),
    ("aqua", Colour::rgb(0x00, 0xff, 0xff)),
    ("aquamarine", Colour::rgb(0x7f, 0xff, 0xd4)),
    ("azure", Colour::rgb(0xf0, 0xff, 0xff)),
    ("beige", Colour::rgb(0xf5, 0xf5, 0xdc)),
    ("bisque", Colour::rgb(0xff, 0xe4, 0xc4)),
    ("black", Colour::rgb(0x00, 0x00, 0x00)),
    ("blanchedalmond", Colour::rgb(0xff, 0xeb, 0xcd)),
    ("blue", Colour::rgb(0x00, 0x00, 0xff)),
    ("blueviolet", Colour::rgb(0x8a, 0x2b, 0xe2)),
    ("brown", Colour::rgb(0xa5, 0x2a, 0x2a)),
    ("burlywood", Colour::rgb(0xde, 0xb8, 0x87)),
    ("cadetblue", Colour::rgb(0x5f, 0x9e, 0xa0)),
    ("chartreuse", Colour::rgb(0x7f, 0xff, 0x00)),
    ("chocolate", Colour::rgb(0xd2, 0x69, 0x1e)),
    ("coral", Colour::rgb(0xff, 0x7f, 0x50)),
    ("cornflowerblue", Colour::rgb(0x64, 0x95, 0xed)),
    ("cornsilk", Colour::rgb(0xff, 0xf8, 0xdc)),
    ("crimson", Colour::rgb(0xdc, 0x14, 0x3c)),
    ("cyan", Colour::rgb(0x00, 0xff, 0xff)),
    ("darkblue", Colour::rgb(0x00, 0x00, 0x8b)),
    ("darkcyan", Colour::rgb(0x00, 0x8b, 0x8b)),
    ("darkgoldenrod", Colour::rgb(0xb8, 0x86, 0x0b)),
    ("darkgray", Colour::rgb(0xa9, 0xa9, 0xa9)),
    ("darkgreen", Colour::rgb(0x00, 0x64, 0x00)),
    ("darkgrey", Colour::rgb(0xa9, 0xa9, 0xa9)),
    ("darkkhaki", Colour::rgb(0xbd, 0xb7, 0x6b)),
    ("darkmagenta", Colour::rgb(0x8b, 0x00, 0x8b)),
    ("darkolivegreen", Colour::rgb(0x55, 0x6b, 0x2f)),
    ("darkorange", Colour::rgb(0xff, 0x8c, 0x00)),
    ("darkorchid", Colour::rgb(0x99, 0x32, 0xcc)),
    ("darkred", Colour::rgb(0x8b, 0x00, 0x00)),
    ("darksalmon", Colour::rgb(0xe9, 0x96, 0x7a)),
    ("darkseagreen", Colour::rgb(0x8f, 0xbc, 0x8f)),
    ("darkslateblue", Colour::rgb(0x48, 0x3d, 0x8b)),
    ("darkslategray", Colour::rgb(0x2f, 0x4f, 0x4f)),
    ("darkslategrey", Colour::rgb(0x2f, 0x4f, 0x4f)),
    ("darkturquoise", Colour::rgb(0x00, 0xce, 0xd1)),
    ("darkviolet", Colour::rgb(0x94, 0x00, 0xd3)),
    ("deeppink", Colour::rgb(0xff, 0x14, 0x93)),
    ("deepskyblue", Colour::rgb(0x00, 0xbf, 0xff)),
    ("dimgray", Colour::rgb(0x69, 0x69, 0x69)),
    ("dimgrey", Colour::rgb(0x69, 0x69, 0x69)),
    ("dodgerblue", Colour::rgb(0x1e, 0x90, 0xff)),
    ("firebrick", Colour::rgb(0xb2, 0x22, 0x22)),
    ("floralwhite", Colour::rgb(0xff, 0xfa, 0xf0)),
    ("forestgreen", Colour::rgb(0x22, 0x8b, 0x22)),
    ("fuchsia", Colour::rgb(0xff, 0x00, 0xff)),
    ("gainsboro", Colour::rgb(0xdc, 0xdc, 0xdc)),
    ("ghostwhite", Colour::rgb(0xf8, 0xf8, 0xff)),
    ("gold", Colour::rgb(0xff, 0xd7, 0x00)),
    ("goldenrod", Colour::rgb(0xda, 0xa5, 0x20)),
    ("gray", Colour::rgb(0x80, 0x80, 0x80)),
    ("green", Colour::rgb(0x00, 0x80, 0x00)),
    ("greenyellow", Colour::rgb(0xad, 0xff, 0x2f)),
    ("grey", Colour::rgb(0x80, 0x80, 0x80)),
    ("honeydew", Colour::rgb(0xf0, 0xff, 0xf0)),
    ("hotpink", Colour::rgb(0xff, 0x69, 0xb4)),
    ("indianred", Colour::rgb(0xcd, 0x5c, 0x5c)),
    ("indigo", Colour::rgb(0x4b, 0x00, 0x82)),
    ("ivory", Colour::rgb(0xff, 0xff, 0xf0)),
    ("khaki", Colour::rgb(0xf0, 0xe6, 0x8c)),
    ("lavender", Colour::rgb(0xe6, 0xe6, 0xfa)),
    ("lavenderblush", Colour::rgb(0xff, 0xf0, 0xf5)),
    ("lawngreen", Colour::rgb(0x7c, 0xfc, 0x00)),
    ("lemonchiffon", Colour::rgb(0xff, 0xfa, 0xcd)),
    ("lightblue", Colour::rgb(0xad, 0xd8, 0xe6)),
    ("lightcoral", Colour::rgb(0xf0, 0x80, 0x80)),
    ("lightcyan", Colour::rgb(0xe0, 0xff, 0xff)),
    ("lightgoldenrodyellow", Colour::rgb(0xfa, 0xfa, 0xd2)),
    ("lightgray", Colour::rgb(0xd3, 0xd3, 0xd3)),
    ("lightgreen", Colour::rgb(0x90, 0xee, 0x90)),
    ("lightgrey", Colour::rgb(0xd3, 0xd3, 0xd3)),
    ("lightpink", Colour::rgb(0xff, 0xb6, 0xc1)),
    ("lightsalmon", Colour::rgb(0xff, 0xa0, 0x7a)),
    ("lightseagreen", Colour::rgb(0x20, 0xb2, 0xaa)),
    ("lightskyblue", Colour::rgb(0x87, 0xce, 0xfa)),
    ("lightslategray", Colour::rgb(0x77, 0x88, 0x99)),
    ("lightslategrey", Colour::rgb(0x77, 0x88, 0x99)),
    ("lightsteelblue", Colour::rgb(0xb0, 0xc4, 0xde)),
    ("lightyellow", Colour::rgb(0xff, 0xff, 0xe0)),
    ("lime", Colour::rgb(0x00, 0xff, 0x00)),
    ("limegreen", Colour::rgb(0x32, 0xcd, 0x32)),
    ("linen", Colour::rgb(0xfa, 0xf0, 0xe6)),
    ("magenta", Colour::rgb(0xff, 0x00, 0xff)),
    ("maroon", Colour::rgb(0x80, 0x00, 0x00)),
    ("mediumaquamarine", Colour::rgb(0x66, 0xcd, 0xaa)),
    ("mediumblue", Colour::rgb(0x00, 0x00, 0xcd)),
    ("mediumorchid", Colour::rgb(0xba, 0x55, 0xd3)),
    ("mediumpurple", Colour::rgb(0x93, 0x70, 0xdb)),
    ("mediumseagreen", Colour::rgb(0x3c, 0xb3, 0x71)),
    ("mediumslateblue", Colour::rgb(0x7b, 0x68, 0xee)),
    ("mediumspringgreen", Colour::rgb(0x00, 0xfa, 0x9a)),
    ("mediumturquoise", Colour::rgb(0x48, 0xd1, 0xcc)),
    ("mediumvioletred", Colour::rgb(0xc7, 0x15, 0x85)),
    ("midnightblue", Colour::rgb(0x19, 0x19, 0x70)),
    ("mintcream", Colour::rgb(0xf5, 0xff, 0xfa)),
    ("mistyrose", Colour::rgb(0xff, 0xe4, 0xe1)),
    ("moccasin", Colour::rgb(0xff, 0xe4, 0xb5)),
    ("navajowhite", Colour::rgb(0xff, 0xde, 0xad)),
    ("navy", Colour::rgb(0x00, 0x00, 0x80)),
    ("oldlace", Colour::rgb(0xfd, 0xf5, 0xe6)),
    ("olive", Colour::rgb(0x80, 0x80, 0x00)),
    ("olivedrab", Colour::rgb(0x6b, 0x8e, 0x23)),
    ("orange", Colour::rgb(0xff, 0xa5, 0x00)),
    ("orangered", Colour::rgb(0xff, 0x45, 0x00)),
    ("orchid", Colour::rgb(0xda, 0x70, 0xd6)),
    ("palegoldenrod", Colour::rgb(0xee, 0xe8, 0xaa)),
    ("palegreen", Colour::rgb(0x98, 0xfb, 0x98)),
    ("paleturquoise", Colour::rgb(0xaf, 0xee, 0xee)),
    ("palevioletred", Colour::rgb(0xdb, 0x70, 0x93)),
    ("papayawhip", Colour::rgb(0xff, 0xef, 0xd5)),
    ("peachpuff", Colour::rgb(0xff, 0xda, 0xb9)),
    ("peru", Colour::rgb(0xcd, 0x85, 0x3f)),
    ("pink", Colour::rgb(0xff, 0xc0, 0xcb)),
    ("plum", Colour::rgb(0xdd, 0xa0, 0xdd)),
    ("powderblue", Colour::rgb(0xb0, 0xe0, 0xe6)),
    ("purple", Colour::rgb(0x80, 0x00, 0x80)),
    ("red", Colour::rgb(0xff, 0x00, 0x00)),
    ("rosybrown", Colour::rgb(0xbc, 0x8f, 0x8f)),
    ("royalblue", Colour::rgb(0x41, 0x69, 0xe1)),
    ("saddlebrown", Colour::rgb(0x8b, 0x45, 0x13)),
    ("salmon", Colour::rgb(0xfa, 0x80, 0x72)),
    ("sandybrown", Colour::rgb(0xf4, 0xa4, 0x60)),
    ("seagreen", Colour::rgb(0x2e, 0x8b, 0x57)),
    ("seashell", Colour::rgb(0xff, 0xf5, 0xee)),
    ("sienna", Colour::rgb(0xa0, 0x52, 0x2d)),
    ("silver", Colour::rgb(0xc0, 0xc0, 0xc0)),
    ("skyblue", Colour::rgb(0x87, 0xce, 0xeb)),
    ("slateblue", Colour::rgb(0x6a, 0x5a, 0xcd)),
    ("slategray", Colour::rgb(0x70, 0x80, 0x90)),
    ("slategrey", Colour::rgb(0x70, 0x80, 0x90)),
    ("snow", Colour::rgb(0xff, 0xfa, 0xfa)),
    ("springgreen", Colour::rgb(0x00, 0xff, 0x7f)),
    ("steelblue", Colour::rgb(0x46, 0x82, 0xb4)),
    ("tan", Colour::rgb(0xd2, 0xb4, 0x8c)),
    ("teal", Colour::rgb(0x00, 0x80, 0x80)),
    ("thistle", Colour::rgb(0xd8, 0xbf, 0xd8)),
    ("tomato", Colour::rgb(0xff, 0x63, 0x47)),
    ("turquoise", Colour::rgb(0x40, 0xe0, 0xd0)),
    ("violet", Colour::rgb(0xee, 0x82, 0xee)),
    ("wheat", Colour::rgb(0xf5, 0xde, 0xb3)),
    ("white", Colour::rgb(0xff, 0xff, 0xff)),
    ("whitesmoke", Colour::rgb(0xf5, 0xf5, 0xf5)),
    ("yellow", Colour::rgb(0xff, 0xff, 0x00)),
    ("yellowgreen", Colour::rgb(0x9a, 0xcd, 0x32)),
];
